use crate::error::PlaybackError;
use crate::library::SourceHandle;

/// Signals emitted by an audio backend, delivered through `poll_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The loaded source's duration is known.
    MetadataReady { duration: f64 },
    /// Playback position advanced.
    TimeUpdate { position: f64 },
    Play,
    Pause,
    /// The loaded source played to its end.
    Ended,
    Error(String),
}

/// The native media primitive: something that can load a source and play it.
///
/// Positions and durations are in seconds. `duration` is only meaningful after
/// `MediaEvent::MetadataReady` was emitted for the current source.
pub trait AudioBackend {
    /// Bind a new source. Any previous source is released.
    fn set_source(&mut self, source: &SourceHandle);
    /// Prepare the bound source for playback.
    fn load(&mut self) -> Result<(), PlaybackError>;
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn position(&self) -> f64;
    fn set_position(&mut self, secs: f64);
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    fn duration(&self) -> Option<f64>;
    /// Drain the events emitted since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
