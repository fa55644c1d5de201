//! Application model: `App`, the presenter every front end talks to.
//!
//! `App` owns the library, playlists, router, playback controller and any
//! running ingestion job. Its methods map one-to-one onto user gestures, and
//! its view-data helpers return plain strings and numbers for the renderer.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::{LibrarySettings, Settings};
use crate::error::PlaylistError;
use crate::format::{escape_for_display, format_duration, format_track_duration};
use crate::ingest::{IngestEvent, IngestJob, IngestProgress};
use crate::library::{FileSource, Library, select_directory, select_paths};
use crate::player::{AudioBackend, PlaybackController, PlayerStatus};
use crate::playlist::{Playlist, PlaylistStore};
use crate::view::{ViewId, ViewRouter};

pub const EMPTY_PLAYLIST_NAME_NOTICE: &str = "Please enter a playlist name";

/// What the text entry line is collecting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    PlaylistName,
    /// Comma-separated file paths.
    FilePaths,
    /// One directory to walk.
    Directory,
}

impl InputMode {
    pub fn prompt(self) -> &'static str {
        match self {
            InputMode::PlaylistName => "Playlist name",
            InputMode::FilePaths => "Files (comma separated)",
            InputMode::Directory => "Directory",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextInput {
    pub mode: InputMode,
    pub buffer: String,
}

/// Upload screen state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadStatus {
    pub message: String,
    /// Shown while a job runs and until the post-upload navigation happens.
    pub progress: Option<IngestProgress>,
}

/// One line of the library list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibraryRow {
    pub index: usize,
    pub name: String,
    pub duration: String,
    pub now_playing: bool,
}

/// Transport data for the now-playing screen.
#[derive(Clone, Debug, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub filename: String,
    pub elapsed: String,
    pub total: String,
    pub fraction: f64,
    pub status: PlayerStatus,
    pub volume_percent: u8,
}

/// The presenter.
pub struct App<B> {
    pub library: Library,
    pub playlists: PlaylistStore,
    pub router: ViewRouter,
    pub player: PlaybackController<B>,

    /// Cursor in the library / playlist song lists.
    pub selected: usize,
    /// Cursor in the playlist list.
    pub playlist_cursor: usize,

    pub input: Option<TextInput>,
    /// Blocking notice; input is swallowed until it is dismissed.
    pub notice: Option<String>,
    pub upload: UploadStatus,

    ingest: Option<IngestJob>,
    navigate_at: Option<Instant>,

    library_settings: LibrarySettings,
    auto_navigate_delay: Duration,
    seek_seconds: f64,
    volume_step: f32,
}

impl<B: AudioBackend> App<B> {
    pub fn new(player: PlaybackController<B>, settings: &Settings) -> Self {
        let mut router = ViewRouter::new();
        if let Err(e) = router.switch_to_named(&settings.ui.start_view) {
            warn!(error = %e, "ignoring ui.start_view");
        }

        Self {
            library: Library::new(),
            playlists: PlaylistStore::new(),
            router,
            player,

            selected: 0,
            playlist_cursor: 0,

            input: None,
            notice: None,
            upload: UploadStatus::default(),

            ingest: None,
            navigate_at: None,

            library_settings: settings.library.clone(),
            auto_navigate_delay: Duration::from_millis(settings.ui.auto_navigate_delay_ms),
            seek_seconds: settings.audio.seek_seconds,
            volume_step: settings.audio.volume_step,
        }
    }

    pub fn library_settings(&self) -> &LibrarySettings {
        &self.library_settings
    }

    /// Return true if the library contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.library.is_empty()
    }

    pub fn is_ingesting(&self) -> bool {
        self.ingest.as_ref().is_some_and(|job| !job.is_finished())
    }

    pub fn upload_status(&self) -> &UploadStatus {
        &self.upload
    }

    // ----- transport -----

    /// Play the first track, or send the user to the upload screen when there is none.
    pub fn start_listening(&mut self) {
        if self.has_tracks() {
            self.play_index(0);
        } else {
            self.router.switch_to(ViewId::Upload);
        }
    }

    /// Play the track at `index` and bring up the now-playing screen.
    pub fn play_index(&mut self, index: usize) {
        if self.player.play(&self.library, index) {
            self.selected = index;
            self.router.switch_to(ViewId::NowPlaying);
        }
    }

    pub fn play_selected(&mut self) {
        self.play_index(self.selected);
    }

    /// Play/pause; starting from an empty player brings up the now-playing screen.
    pub fn toggle_play_pause(&mut self) {
        let before = self.player.state().current_track;
        self.player.toggle_play_pause(&self.library);
        if before.is_none() && self.player.state().current_track.is_some() {
            self.show_now_playing();
        }
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    pub fn next_track(&mut self) {
        if self.player.next(&self.library) {
            self.show_now_playing();
        }
    }

    pub fn previous_track(&mut self) {
        if self.player.previous(&self.library) {
            self.show_now_playing();
        }
    }

    /// Point the song cursor at the loaded track and switch to its screen.
    fn show_now_playing(&mut self) {
        if let Some(index) = self.player.state().current_track {
            self.selected = index;
        }
        self.router.switch_to(ViewId::NowPlaying);
    }

    pub fn rewind(&mut self) {
        self.player.seek_relative(-self.seek_seconds);
    }

    pub fn fast_forward(&mut self) {
        self.player.seek_relative(self.seek_seconds);
    }

    pub fn volume_up(&mut self) {
        let v = self.player.state().volume + self.volume_step;
        self.player.set_volume(v);
    }

    pub fn volume_down(&mut self) {
        let v = self.player.state().volume - self.volume_step;
        self.player.set_volume(v);
    }

    // ----- cursors -----

    /// Move the song cursor down, wrapping to the top.
    pub fn select_next(&mut self) {
        let len = self.library.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the song cursor up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        let len = self.library.len();
        if len > 0 {
            self.selected = if self.selected == 0 || self.selected >= len {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn next_playlist(&mut self) {
        let len = self.playlists.len();
        if len > 0 {
            self.playlist_cursor = (self.playlist_cursor + 1) % len;
        }
    }

    pub fn prev_playlist(&mut self) {
        let len = self.playlists.len();
        if len > 0 {
            self.playlist_cursor = (self.playlist_cursor + len - 1) % len;
        }
    }

    pub fn current_playlist(&self) -> Option<&Playlist> {
        self.playlists.playlists().get(self.playlist_cursor)
    }

    // ----- text entry -----

    pub fn begin_input(&mut self, mode: InputMode) {
        self.input = Some(TextInput {
            mode,
            buffer: String::new(),
        });
    }

    pub fn push_input(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    /// Act on the entered text according to the input mode.
    pub fn submit_input(&mut self) {
        let Some(TextInput { mode, buffer }) = self.input.take() else {
            return;
        };
        match mode {
            InputMode::PlaylistName => {
                self.create_playlist(&buffer);
            }
            InputMode::FilePaths => {
                let paths: Vec<PathBuf> = buffer
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect();
                self.ingest_paths(&paths);
            }
            InputMode::Directory => {
                let dir = buffer.trim();
                if !dir.is_empty() {
                    self.ingest_directory(Path::new(dir));
                }
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ----- playlists -----

    /// Create a playlist; a blank name raises the blocking notice instead.
    pub fn create_playlist(&mut self, name: &str) -> bool {
        match self.playlists.create(name) {
            Ok(_) => {
                self.playlist_cursor = self.playlists.len() - 1;
                true
            }
            Err(PlaylistError::EmptyName) => {
                self.notice = Some(EMPTY_PLAYLIST_NAME_NOTICE.to_string());
                false
            }
            Err(e) => {
                warn!(error = %e, "cannot create playlist");
                false
            }
        }
    }

    /// Add the song under the cursor to the playlist under the playlist cursor.
    pub fn add_selected_to_playlist(&mut self) -> bool {
        let Some(id) = self.current_playlist().map(|p| p.id) else {
            self.notice = Some("Create a playlist first".to_string());
            return false;
        };
        match self.playlists.add_track(id, self.selected, self.library.len()) {
            Ok(added) => added,
            Err(e) => {
                debug!(error = %e, "add to playlist ignored");
                false
            }
        }
    }

    // ----- ingestion -----

    /// Select `paths` (files as-is, directories expanded) and start ingesting them.
    pub fn ingest_paths(&mut self, paths: &[PathBuf]) {
        let files = select_paths(paths, &self.library_settings);
        self.ingest_files(files);
    }

    /// Select every file under `dir` and start ingesting them.
    pub fn ingest_directory(&mut self, dir: &Path) {
        let files = select_directory(dir, &self.library_settings);
        self.ingest_files(files);
    }

    /// Start ingesting `files`, or queue them behind a job that is still running.
    pub fn ingest_files<F, I>(&mut self, files: I)
    where
        F: FileSource + 'static,
        I: IntoIterator<Item = F>,
    {
        if let Some(job) = self.ingest.as_mut() {
            job.extend(files);
            self.upload.message = format!("Processing {} file(s)...", job.total());
            return;
        }

        let job = IngestJob::new(
            files,
            &self.library_settings.extensions,
            self.library_settings.ingest_batch_size,
        );
        if !job.has_matches() {
            self.upload = UploadStatus {
                message: "No supported audio files found.".to_string(),
                progress: None,
            };
            return;
        }

        info!(total = job.total(), "ingestion started");
        self.upload = UploadStatus {
            message: format!("Processing {} file(s)...", job.total()),
            progress: Some(job.progress()),
        };
        self.navigate_at = None;
        self.ingest = Some(job);
        self.router.switch_to(ViewId::Upload);
    }

    /// Advance background work: one ingestion chunk, backend events, and the
    /// delayed switch to the library after an upload.
    pub fn tick(&mut self, now: Instant) {
        if let Some(job) = self.ingest.as_mut() {
            match job.step(&mut self.library) {
                IngestEvent::Progress(p) => self.upload.progress = Some(p),
                IngestEvent::Finished(p) => {
                    self.upload = UploadStatus {
                        message: format!("✓ Successfully uploaded {} file(s)", p.processed),
                        progress: Some(p),
                    };
                    self.ingest = None;
                    self.navigate_at = Some(now + self.auto_navigate_delay);
                }
                IngestEvent::NoMatchingFiles => {
                    self.upload = UploadStatus {
                        message: "No supported audio files found.".to_string(),
                        progress: None,
                    };
                    self.ingest = None;
                }
            }
        }

        // Auto-advance moves the cursor along but leaves the view alone.
        let before = self.player.state().current_track;
        self.player.pump(&mut self.library);
        let after = self.player.state().current_track;
        if let Some(index) = after.filter(|_| after != before) {
            self.selected = index;
        }

        if self.navigate_at.is_some_and(|at| now >= at) {
            self.navigate_at = None;
            self.upload.progress = None;
            self.router.switch_to(ViewId::Library);
        }
    }

    // ----- view data -----

    pub fn library_rows(&self) -> Vec<LibraryRow> {
        let playing = self.player.state().current_track;
        self.library
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, track)| LibraryRow {
                index,
                name: escape_for_display(&track.name),
                duration: format_track_duration(track.duration_secs),
                now_playing: playing == Some(index),
            })
            .collect()
    }

    pub fn now_playing(&self) -> NowPlaying {
        let state = self.player.state();
        let track = state.current_track.and_then(|i| self.library.get(i));
        let (title, filename) = match track {
            Some(t) => (escape_for_display(&t.name), escape_for_display(&t.filename)),
            None => ("No song playing".to_string(), String::new()),
        };
        // Fall back to a duration captured on an earlier load.
        let total = match (self.player.duration(), track) {
            (Some(d), _) => format_duration(d),
            (None, Some(t)) if t.has_duration() => format_duration(t.duration_secs),
            (None, _) => format_duration(0.0),
        };

        NowPlaying {
            title,
            filename,
            elapsed: format_duration(state.current_time_secs),
            total,
            fraction: self.player.progress_fraction(),
            status: self.player.status(),
            volume_percent: (state.volume * 100.0).round() as u8,
        }
    }
}
