//! `AudioBackend` on top of a rodio output stream.
//!
//! Seeking rebuilds the sink and skips into the file, which works for every
//! format the decoder supports. Elapsed time is tracked with wall-clock
//! timestamps rather than by asking the sink.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use crate::error::PlaybackError;
use crate::library::SourceHandle;

use super::backend::{AudioBackend, MediaEvent};

const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

pub struct RodioBackend {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<SourceHandle>,
    duration: Option<f64>,
    volume: f32,
    paused: bool,
    ended: bool,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
    last_time_update: Option<Instant>,
    events: VecDeque<MediaEvent>,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would tear
        // through the terminal UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            source: None,
            duration: None,
            volume: 1.0,
            paused: true,
            ended: false,
            started_at: None,
            accumulated: Duration::ZERO,
            last_time_update: None,
            events: VecDeque::new(),
        })
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn freeze_clock(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    /// Replace the sink with a fresh one positioned at `start_at`.
    fn rebuild_sink(&mut self, start_at: Duration) -> Result<(), PlaybackError> {
        let path = self
            .source
            .as_ref()
            .map(|s| s.path().to_path_buf())
            .ok_or(PlaybackError::NoSource)?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let (sink, _) = create_sink_at(&self.stream, &path, start_at)?;
        sink.set_volume(self.volume);
        if !self.paused {
            sink.play();
        }
        self.sink = Some(sink);
        self.accumulated = start_at;
        self.started_at = if self.paused { None } else { Some(Instant::now()) };
        self.ended = false;
        Ok(())
    }
}

impl AudioBackend for RodioBackend {
    fn set_source(&mut self, source: &SourceHandle) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.source = Some(source.clone());
        self.duration = None;
        self.paused = true;
        self.ended = false;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.last_time_update = None;
        self.events.clear();
    }

    fn load(&mut self) -> Result<(), PlaybackError> {
        let path = self
            .source
            .as_ref()
            .map(|s| s.path().to_path_buf())
            .ok_or(PlaybackError::NoSource)?;

        let (sink, decoded_total) = match create_sink_at(&self.stream, &path, Duration::ZERO) {
            Ok(v) => v,
            Err(e) => {
                self.events.push_back(MediaEvent::Error(e.to_string()));
                return Err(e);
            }
        };
        sink.set_volume(self.volume);
        self.sink = Some(sink);

        self.duration = probe_duration(&path).or(decoded_total.map(|d| d.as_secs_f64()));
        match self.duration {
            Some(duration) => self.events.push_back(MediaEvent::MetadataReady { duration }),
            None => debug!(path = %path.display(), "duration unknown"),
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.sink.is_none() {
            return Err(PlaybackError::NoSource);
        }
        if self.ended {
            // Playing again after the end restarts the track.
            self.paused = true;
            self.rebuild_sink(Duration::ZERO)?;
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
        }
        if self.paused {
            self.paused = false;
            self.started_at = Some(Instant::now());
            self.events.push_back(MediaEvent::Play);
        }
        Ok(())
    }

    fn pause(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if self.paused {
            return;
        }
        sink.pause();
        self.freeze_clock();
        self.paused = true;
        self.events.push_back(MediaEvent::Pause);
    }

    fn position(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        match self.duration {
            Some(d) => secs.min(d),
            None => secs,
        }
    }

    fn set_position(&mut self, secs: f64) {
        if self.sink.is_none() || !secs.is_finite() {
            return;
        }
        let target = Duration::from_secs_f64(secs.max(0.0));
        if let Err(e) = self.rebuild_sink(target) {
            warn!(error = %e, "seek failed");
            self.events.push_back(MediaEvent::Error(e.to_string()));
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(volume);
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let finished = !self.paused
            && !self.ended
            && self.sink.as_ref().is_some_and(|s| s.empty());
        if finished {
            self.freeze_clock();
            self.paused = true;
            self.ended = true;
            self.events.push_back(MediaEvent::Pause);
            self.events.push_back(MediaEvent::Ended);
        } else if !self.paused {
            let due = self
                .last_time_update
                .is_none_or(|t| t.elapsed() >= TIME_UPDATE_INTERVAL);
            if due {
                self.last_time_update = Some(Instant::now());
                let position = self.position();
                self.events.push_back(MediaEvent::TimeUpdate { position });
            }
        }
        self.events.drain(..).collect()
    }
}

/// Create a paused `Sink` for the file at `path` that starts at `start_at`.
///
/// Also returns the decoder's own idea of the total duration, if it has one.
fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), PlaybackError> {
    let file = File::open(path).map_err(|source| PlaybackError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let total = decoder.total_duration();
    // Seek by skipping; a zero skip starts at the top.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}

/// Read the duration from the file's headers.
fn probe_duration(path: &Path) -> Option<f64> {
    let tagged = lofty::read_from_path(path).ok()?;
    let secs = tagged.properties().duration().as_secs_f64();
    (secs > 0.0).then_some(secs)
}
