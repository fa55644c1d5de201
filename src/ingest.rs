//! Ingestion pipeline: turns a file selection into library tracks.
//!
//! A job filters the selection down to supported audio files up front and then
//! appends them to the library one chunk per `step`. Callers redraw between
//! steps, so a large selection never freezes the interface.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::library::{FileSource, Library, display_name, matching_extension, normalized_extensions};

/// Progress of a running job, counted in accepted files.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IngestProgress {
    pub processed: usize,
    pub total: usize,
}

impl IngestProgress {
    /// Completion in percent, rounded to the nearest integer.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.processed as f64 / self.total as f64) * 100.0).round() as u8
    }
}

/// Outcome of one ingestion step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    /// Nothing in the selection has a supported extension; the library is untouched.
    NoMatchingFiles,
    /// A chunk was processed and more remain.
    Progress(IngestProgress),
    /// The last chunk was processed.
    Finished(IngestProgress),
}

struct Pending {
    file: Box<dyn FileSource>,
    ext: String,
}

pub struct IngestJob {
    pending: VecDeque<Pending>,
    total: usize,
    processed: usize,
    failed: usize,
    batch_size: usize,
    extensions: Vec<String>,
}

impl IngestJob {
    /// Create a job for `files`, keeping only names that end in one of `extensions`.
    pub fn new<F, I>(files: I, extensions: &[String], batch_size: usize) -> Self
    where
        F: FileSource + 'static,
        I: IntoIterator<Item = F>,
    {
        let mut job = Self {
            pending: VecDeque::new(),
            total: 0,
            processed: 0,
            failed: 0,
            batch_size: batch_size.max(1),
            extensions: normalized_extensions(extensions),
        };
        job.extend(files);
        job
    }

    /// Queue more files behind the ones still pending.
    pub fn extend<F, I>(&mut self, files: I)
    where
        F: FileSource + 'static,
        I: IntoIterator<Item = F>,
    {
        let mut skipped = 0usize;
        for file in files {
            match matching_extension(file.name(), &self.extensions) {
                Some(ext) => {
                    let ext = ext.to_string();
                    self.pending.push_back(Pending {
                        file: Box::new(file),
                        ext,
                    });
                    self.total += 1;
                }
                None => skipped += 1,
            }
        }
        debug!(accepted = self.total, skipped, "selection filtered");
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_matches(&self) -> bool {
        self.total > 0
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn progress(&self) -> IngestProgress {
        IngestProgress {
            processed: self.processed,
            total: self.total,
        }
    }

    /// Number of accepted files that could not be opened.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Process one chunk of pending files into `library`.
    pub fn step(&mut self, library: &mut Library) -> IngestEvent {
        if self.total == 0 {
            return IngestEvent::NoMatchingFiles;
        }

        for _ in 0..self.batch_size {
            let Some(Pending { file, ext }) = self.pending.pop_front() else {
                break;
            };
            match file.open() {
                Ok(source) => {
                    let filename = file.name().to_string();
                    let name = display_name(&filename, &ext);
                    let id = library.push(name, filename, source);
                    self.processed += 1;
                    debug!(track = %id, file = file.name(), "track added");
                }
                Err(e) => {
                    self.failed += 1;
                    warn!(file = file.name(), error = %e, "skipping file");
                }
            }
        }

        let progress = self.progress();
        if self.pending.is_empty() {
            info!(
                processed = progress.processed,
                total = progress.total,
                failed = self.failed,
                "ingestion finished"
            );
            IngestEvent::Finished(progress)
        } else {
            IngestEvent::Progress(progress)
        }
    }
}

#[cfg(test)]
mod tests;
