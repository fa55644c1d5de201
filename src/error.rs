//! Error types for the player's components.
//!
//! None of these are fatal: the runtime logs them or turns them into a notice
//! and the requested action simply does not happen.

use std::path::PathBuf;

use thiserror::Error;

use crate::playlist::PlaylistId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("playlist name must not be empty")]
    EmptyName,
    #[error("no playlist with id {0}")]
    NotFound(PlaylistId),
    #[error("track index {index} is outside the library ({len} tracks)")]
    TrackOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0:?} is not a regular file")]
    NotAFile(PathBuf),
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no source loaded")]
    NoSource,
    #[error("cannot open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {path:?}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("audio output unavailable: {0}")]
    Output(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("unknown view {0:?}")]
    NotFound(String),
}
