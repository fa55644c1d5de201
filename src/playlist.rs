//! Playlist store: named, ordered sets of references into the library.
//!
//! Playlists reference tracks by library position. Tracks are never removed,
//! so a position recorded here stays valid for the session.

use std::fmt;

use tracing::{debug, info};

use crate::error::PlaylistError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistId(u64);

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub track_indices: Vec<usize>,
}

impl Playlist {
    pub fn contains(&self, track_index: usize) -> bool {
        self.track_indices.contains(&track_index)
    }
}

#[derive(Debug, Default)]
pub struct PlaylistStore {
    playlists: Vec<Playlist>,
    next_id: u64,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    /// All playlists in creation order.
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn get(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Create an empty playlist named `name` (trimmed).
    pub fn create(&mut self, name: &str) -> Result<PlaylistId, PlaylistError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlaylistError::EmptyName);
        }

        let id = PlaylistId(self.next_id);
        self.next_id += 1;
        self.playlists.push(Playlist {
            id,
            name: name.to_string(),
            track_indices: Vec::new(),
        });
        info!(playlist = %id, name, "playlist created");
        Ok(id)
    }

    /// Append `track_index` to the playlist unless it is already there.
    ///
    /// Returns `Ok(true)` when the track was appended and `Ok(false)` when it
    /// was already present.
    pub fn add_track(
        &mut self,
        id: PlaylistId,
        track_index: usize,
        library_len: usize,
    ) -> Result<bool, PlaylistError> {
        if track_index >= library_len {
            return Err(PlaylistError::TrackOutOfRange {
                index: track_index,
                len: library_len,
            });
        }
        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PlaylistError::NotFound(id))?;

        if playlist.contains(track_index) {
            return Ok(false);
        }
        playlist.track_indices.push(track_index);
        debug!(playlist = %id, track_index, "track added to playlist");
        Ok(true)
    }

    /// Return true when `track_index` is part of the playlist.
    pub fn contains(&self, id: PlaylistId, track_index: usize) -> bool {
        self.get(id).is_some_and(|p| p.contains(track_index))
    }
}
