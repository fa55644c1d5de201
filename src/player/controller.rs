use tracing::{debug, error, info, warn};

use crate::library::Library;

use super::backend::{AudioBackend, MediaEvent};
use super::oneshot::OneShot;

/// Coarse playback status derived from `PlaybackState`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Nothing has been loaded yet.
    Empty,
    Paused,
    Playing,
}

/// Transport state mirrored from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Library index of the loaded track, if any.
    pub current_track: Option<usize>,
    pub is_playing: bool,
    pub current_time_secs: f64,
    /// 0.0 to 1.0.
    pub volume: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track: None,
            is_playing: false,
            current_time_secs: 0.0,
            volume: 1.0,
        }
    }
}

pub struct PlaybackController<B> {
    backend: B,
    state: PlaybackState,
    /// Library index whose duration the next `MetadataReady` belongs to.
    metadata: OneShot<usize>,
    dragging: bool,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(mut backend: B, volume: f32) -> Self {
        let volume = sanitize_volume(volume).unwrap_or(1.0);
        backend.set_volume(volume);
        Self {
            state: PlaybackState {
                volume: backend.volume(),
                ..PlaybackState::default()
            },
            backend,
            metadata: OneShot::default(),
            dragging: false,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> PlayerStatus {
        match (self.state.current_track, self.state.is_playing) {
            (None, _) => PlayerStatus::Empty,
            (Some(_), true) => PlayerStatus::Playing,
            (Some(_), false) => PlayerStatus::Paused,
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The loaded source's duration, once the backend knows a usable one.
    pub fn duration(&self) -> Option<f64> {
        self.backend
            .duration()
            .filter(|d| d.is_finite() && *d > 0.0)
    }

    /// True while a loaded track's metadata has not arrived yet.
    pub fn awaiting_metadata(&self) -> bool {
        self.metadata.is_armed()
    }

    /// Position as a fraction of the duration, 0.0 while the duration is unknown.
    pub fn progress_fraction(&self) -> f64 {
        match self.duration() {
            Some(d) => (self.state.current_time_secs / d).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Load and start the track at `index`, replacing whatever is loaded.
    ///
    /// Returns false when `index` is not a library position.
    pub fn play(&mut self, library: &Library, index: usize) -> bool {
        let Some(track) = library.get(index) else {
            debug!(index, len = library.len(), "play ignored: index out of range");
            return false;
        };

        self.state.current_track = Some(index);
        self.state.current_time_secs = 0.0;
        self.state.is_playing = false;

        self.backend.set_source(&track.source);
        if let Err(e) = self.backend.load() {
            self.metadata.disarm();
            error!(track = %track.id, file = %track.filename, error = %e, "load failed");
            return true;
        }
        self.metadata.arm(index);

        info!(track = %track.id, name = %track.name, "playing");
        self.start();
        true
    }

    /// Start track 0 when nothing is loaded, otherwise flip between play and pause.
    pub fn toggle_play_pause(&mut self, library: &Library) {
        if self.state.current_track.is_none() {
            if !library.is_empty() {
                self.play(library, 0);
            }
            return;
        }

        if self.state.is_playing {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn pause(&mut self) {
        self.backend.pause();
        self.state.is_playing = false;
    }

    /// Pause and rewind to the beginning.
    pub fn stop(&mut self) {
        self.backend.pause();
        self.backend.set_position(0.0);
        self.state.is_playing = false;
        self.state.current_time_secs = 0.0;
    }

    /// Play the following track, wrapping to the first.
    pub fn next(&mut self, library: &Library) -> bool {
        if library.is_empty() {
            return false;
        }
        let next = match self.state.current_track {
            Some(i) => (i + 1) % library.len(),
            None => 0,
        };
        self.play(library, next)
    }

    /// Play the preceding track, wrapping to the last.
    pub fn previous(&mut self, library: &Library) -> bool {
        if library.is_empty() {
            return false;
        }
        let prev = match self.state.current_track {
            Some(i) if i > 0 => i - 1,
            _ => library.len() - 1,
        };
        self.play(library, prev)
    }

    /// Move the position by `delta` seconds, clamped to the track.
    pub fn seek_relative(&mut self, delta: f64) {
        let Some(duration) = self.duration() else {
            return;
        };
        if !delta.is_finite() {
            return;
        }
        let target = (self.backend.position() + delta).clamp(0.0, duration);
        self.seek_to(target);
    }

    /// Jump to `fraction` (clamped to 0..=1) of the track.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let Some(duration) = self.duration() else {
            return;
        };
        if !fraction.is_finite() {
            return;
        }
        self.seek_to(fraction.clamp(0.0, 1.0) * duration);
    }

    fn seek_to(&mut self, secs: f64) {
        self.backend.set_position(secs);
        self.state.current_time_secs = secs;
    }

    /// Pointer went down on the progress bar.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Pointer moved; seeks only while a drag is in progress.
    pub fn drag_to(&mut self, fraction: f64) {
        if self.dragging {
            self.seek_to_fraction(fraction);
        }
    }

    /// Pointer went up anywhere.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn set_volume(&mut self, volume: f32) {
        let Some(volume) = sanitize_volume(volume) else {
            return;
        };
        self.backend.set_volume(volume);
        self.state.volume = self.backend.volume();
    }

    /// Drain and apply everything the backend emitted since the last call.
    pub fn pump(&mut self, library: &mut Library) {
        for event in self.backend.poll_events() {
            self.handle_event(library, event);
        }
    }

    pub fn handle_event(&mut self, library: &mut Library, event: MediaEvent) {
        match event {
            MediaEvent::MetadataReady { duration } => {
                if let Some(index) = self.metadata.fire() {
                    if library.set_duration(index, duration) {
                        debug!(index, duration, "duration captured");
                    }
                }
            }
            MediaEvent::TimeUpdate { position } => {
                // Metadata precedes the first time update; a source without
                // a duration never sends it.
                if self.metadata.is_armed() && self.duration().is_none() {
                    self.metadata.disarm();
                    debug!("source has no duration");
                }
                if position.is_finite() {
                    self.state.current_time_secs = position.max(0.0);
                }
            }
            MediaEvent::Play => self.state.is_playing = true,
            MediaEvent::Pause => self.state.is_playing = false,
            MediaEvent::Ended => {
                self.state.is_playing = false;
                if !library.is_empty() {
                    self.next(library);
                }
            }
            MediaEvent::Error(message) => warn!(%message, "audio backend error"),
        }
    }

    fn start(&mut self) {
        match self.backend.play() {
            Ok(()) => self.state.is_playing = true,
            Err(e) => {
                error!(error = %e, "playback rejected");
                self.state.is_playing = false;
            }
        }
    }
}

fn sanitize_volume(volume: f32) -> Option<f32> {
    if volume.is_nan() {
        None
    } else {
        Some(volume.clamp(0.0, 1.0))
    }
}
