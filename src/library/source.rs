//! File handles consumed by ingestion and the playable references they yield.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::IngestError;

/// Opaque playable reference handed to the audio backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHandle(PathBuf);

impl SourceHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// A selected file: something with a name that can produce a playable reference.
pub trait FileSource {
    fn name(&self) -> &str;
    fn open(&self) -> Result<SourceHandle, IngestError>;
}

/// A file on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Result<SourceHandle, IngestError> {
        let file = File::open(&self.path).map_err(|source| IngestError::Open {
            path: self.path.clone(),
            source,
        })?;
        let is_file = file
            .metadata()
            .map(|m| m.is_file())
            .map_err(|source| IngestError::Open {
                path: self.path.clone(),
                source,
            })?;
        if !is_file {
            return Err(IngestError::NotAFile(self.path.clone()));
        }
        Ok(SourceHandle::new(&self.path))
    }
}
