use std::fmt;

use super::source::SourceHandle;

/// Session-unique identifier of a track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    /// Display name: the file name without its audio extension.
    pub name: String,
    /// File name as selected.
    pub filename: String,
    pub source: SourceHandle,
    /// Zero until the audio backend reports real metadata.
    pub duration_secs: f64,
}

impl Track {
    /// Return true once the backend has reported a real duration.
    pub fn has_duration(&self) -> bool {
        self.duration_secs > 0.0 && self.duration_secs.is_finite()
    }
}

/// Ordered collection of tracks loaded during this session.
#[derive(Debug, Default)]
pub struct Library {
    tracks: Vec<Track>,
    next_id: u64,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Append a track with unknown duration and return its id.
    pub fn push(&mut self, name: String, filename: String, source: SourceHandle) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        self.tracks.push(Track {
            id,
            name,
            filename,
            source,
            duration_secs: 0.0,
        });
        id
    }

    /// Record the duration reported for the track at `index`.
    ///
    /// Returns false when `index` is out of range or the value is not a usable
    /// duration.
    pub fn set_duration(&mut self, index: usize, secs: f64) -> bool {
        if !secs.is_finite() || secs < 0.0 {
            return false;
        }
        match self.tracks.get_mut(index) {
            Some(track) => {
                track.duration_secs = secs;
                true
            }
            None => false,
        }
    }
}
