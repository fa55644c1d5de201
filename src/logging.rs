//! Log setup. The terminal belongs to the UI, so logs go to a file.
//!
//! Filter: `GROOVE_LOG` (env-filter syntax, default `info`).
//! Directory: `GROOVE_LOG_DIR`, else `$XDG_STATE_HOME/groove`, else
//! `~/.local/state/groove`.

use std::env;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "groove.log";

/// Install the global subscriber. Keep the returned guard alive for as long as
/// logs should be flushed.
pub fn init() -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let dir = log_dir().ok_or("cannot determine a log directory")?;
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("GROOVE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(guard)
}

/// Resolve the log directory from `GROOVE_LOG_DIR` or XDG defaults.
pub fn log_dir() -> Option<PathBuf> {
    if let Some(p) = env::var_os("GROOVE_LOG_DIR") {
        return Some(PathBuf::from(p));
    }
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };
    state_home.map(|d| d.join("groove"))
}
