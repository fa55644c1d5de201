//! Scripted backend for tests.

use std::collections::VecDeque;

use crate::error::PlaybackError;
use crate::library::SourceHandle;

use super::backend::{AudioBackend, MediaEvent};

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    pub source: Option<SourceHandle>,
    pub loads: usize,
    pub playing: bool,
    pub position: f64,
    pub volume: f32,
    pub duration: Option<f64>,
    /// Duration announced with `MetadataReady` by the next `load`.
    pub next_duration: Option<f64>,
    pub reject_play: bool,
    pub fail_load: bool,
    pub events: VecDeque<MediaEvent>,
}

impl FakeBackend {
    pub fn with_duration(secs: f64) -> Self {
        Self {
            next_duration: Some(secs),
            ..Self::default()
        }
    }

    pub fn emit(&mut self, event: MediaEvent) {
        self.events.push_back(event);
    }
}

impl AudioBackend for FakeBackend {
    fn set_source(&mut self, source: &SourceHandle) {
        self.source = Some(source.clone());
        self.duration = None;
        self.position = 0.0;
        self.playing = false;
        self.events.clear();
    }

    fn load(&mut self) -> Result<(), PlaybackError> {
        if self.fail_load {
            return Err(PlaybackError::Decode {
                path: self
                    .source
                    .as_ref()
                    .map(|s| s.path().to_path_buf())
                    .unwrap_or_default(),
                message: "scripted failure".to_string(),
            });
        }
        self.loads += 1;
        if let Some(d) = self.next_duration {
            self.duration = Some(d);
            self.events.push_back(MediaEvent::MetadataReady { duration: d });
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.reject_play || self.source.is_none() {
            return Err(PlaybackError::NoSource);
        }
        self.playing = true;
        self.events.push_back(MediaEvent::Play);
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.events.push_back(MediaEvent::Pause);
        }
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, secs: f64) {
        self.position = secs;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }
}
