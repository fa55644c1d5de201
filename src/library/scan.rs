use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::source::LocalFile;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Select every regular file under `dir`, the way a directory picker would.
///
/// No extension filtering happens here; the ingestion pipeline decides what it
/// accepts. Files come back in a stable, per-directory name order.
pub fn select_directory(dir: &Path, settings: &LibrarySettings) -> Vec<LocalFile> {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut files = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        match entry {
            Ok(entry) if entry.path().is_file() => files.push(LocalFile::new(entry.path())),
            Ok(_) => {}
            Err(e) => warn!(dir = %dir.display(), error = %e, "skipping unreadable entry"),
        }
    }

    debug!(dir = %dir.display(), count = files.len(), "directory selected");
    files
}

/// Turn a list of paths into a selection: files are taken as-is, directories
/// are expanded with `select_directory`.
pub fn select_paths(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<LocalFile> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(select_directory(path, settings));
        } else {
            files.push(LocalFile::new(path));
        }
    }
    files
}
