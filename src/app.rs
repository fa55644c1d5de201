//! Application module: exposes the presenter used by the TUI and runtime.
//!
//! `App` lives in `app::model` and owns the library, playlists, current view
//! and playback controller.

mod model;

pub use model::*;
