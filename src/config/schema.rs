use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/groove/config.toml` or `~/.config/groove/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `GROOVE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Initial volume, 0.0 to 1.0.
    pub volume: f32,
    /// Seconds skipped by the rewind / forward keys.
    pub seek_seconds: f64,
    /// Volume change per `+` / `-` key press.
    pub volume_step: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            seek_seconds: 10.0,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions accepted by ingestion (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when a directory is selected.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Files processed per ingestion step before the UI gets to redraw.
    pub ingest_batch_size: usize,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            ingest_batch_size: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered on the home screen.
    pub header_text: String,
    /// Delay before switching to the library after an upload finishes (milliseconds).
    pub auto_navigate_delay_ms: u64,
    /// Input poll interval of the event loop (milliseconds).
    pub tick_ms: u64,
    /// View shown at startup: `home`, `upload`, `library`, `now-playing`,
    /// `playlists` or `settings`.
    pub start_view: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ your music, right here ~ ".to_string(),
            auto_navigate_delay_ms: 1500,
            tick_ms: 50,
            start_view: "home".to_string(),
        }
    }
}
