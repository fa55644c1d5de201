//! Track library: the ordered, session-only collection of loaded tracks.
//!
//! Tracks are appended by the ingestion pipeline and never removed, so a
//! position in the library stays valid for the whole session.

mod display;
mod model;
mod scan;
mod source;

pub use display::{display_name, matching_extension, normalized_extensions};
pub use model::*;
pub use scan::{select_directory, select_paths};
pub use source::{FileSource, LocalFile, SourceHandle};

#[cfg(test)]
mod tests;
