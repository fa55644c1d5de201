use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::view::ViewId;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment variables
/// (prefix `GROOVE__`) on top, and falls back to struct defaults.
impl Settings {
    /// Load settings from an optional config file and the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("GROOVE")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("library.extensions")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.library.ingest_batch_size == 0 {
            return Err("library.ingest_batch_size must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err("audio.volume must be between 0.0 and 1.0".to_string());
        }
        if self.audio.seek_seconds.is_nan() || self.audio.seek_seconds <= 0.0 {
            return Err("audio.seek_seconds must be > 0".to_string());
        }
        if let Err(e) = self.ui.start_view.parse::<ViewId>() {
            return Err(format!("ui.start_view: {e}"));
        }
        Ok(())
    }
}

/// Resolve the config path from `GROOVE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("GROOVE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/groove/config.toml`
/// or `~/.config/groove/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("groove").join("config.toml"))
}
