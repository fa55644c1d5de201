//! View router: exactly one of a fixed set of screens is active.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::ViewError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ViewId {
    #[default]
    Home,
    Upload,
    Library,
    NowPlaying,
    Playlists,
    Settings,
}

impl ViewId {
    /// All views in tab order.
    pub const ALL: [ViewId; 6] = [
        ViewId::Home,
        ViewId::Upload,
        ViewId::Library,
        ViewId::NowPlaying,
        ViewId::Playlists,
        ViewId::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Upload => "upload",
            ViewId::Library => "library",
            ViewId::NowPlaying => "now-playing",
            ViewId::Playlists => "playlists",
            ViewId::Settings => "settings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewId::Home => "Home",
            ViewId::Upload => "Upload",
            ViewId::Library => "Library",
            ViewId::NowPlaying => "Now Playing",
            ViewId::Playlists => "Playlists",
            ViewId::Settings => "Settings",
        }
    }

    /// Index of this view in `ALL`.
    pub fn position(self) -> usize {
        Self::ALL.iter().position(|&v| v == self).unwrap_or(0)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ViewError::NotFound(s.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct ViewRouter {
    active: ViewId,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ViewId {
        self.active
    }

    pub fn is_active(&self, view: ViewId) -> bool {
        self.active == view
    }

    pub fn switch_to(&mut self, view: ViewId) {
        if self.active != view {
            debug!(from = %self.active, to = %view, "switching view");
        }
        self.active = view;
    }

    /// Switch by view id string; an unknown id leaves the active view unchanged.
    pub fn switch_to_named(&mut self, id: &str) -> Result<(), ViewError> {
        let view = id.parse::<ViewId>()?;
        self.switch_to(view);
        Ok(())
    }

    /// Move to the next tab, wrapping around.
    pub fn next(&mut self) {
        let pos = (self.active.position() + 1) % ViewId::ALL.len();
        self.switch_to(ViewId::ALL[pos]);
    }

    /// Move to the previous tab, wrapping around.
    pub fn previous(&mut self) {
        let len = ViewId::ALL.len();
        let pos = (self.active.position() + len - 1) % len;
        self.switch_to(ViewId::ALL[pos]);
    }
}
