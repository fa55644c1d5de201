//! Playback: the controller that owns transport state and the audio backend it
//! drives.
//!
//! The controller never touches audio directly. It issues commands through the
//! `AudioBackend` trait and mirrors the backend's `MediaEvent`s back into its
//! `PlaybackState`.

mod backend;
mod controller;
mod oneshot;
mod rodio_backend;

pub use backend::{AudioBackend, MediaEvent};
pub use controller::{PlaybackController, PlaybackState, PlayerStatus};
pub use rodio_backend::RodioBackend;

#[cfg(test)]
pub(crate) mod fake;
