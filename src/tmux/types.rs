//! Hierarchical multiplexer model rebuilt from each listing.

use serde::Serialize;

/// One tmux session. `name` is the addressing key; `id` (`$N`) is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub attached: bool,
    /// Number of clients attached, from `session_attached`.
    pub attached_count: u32,
    pub window_count: u32,
    /// Filled only by tree composition; empty after a plain listing.
    pub windows: Vec<Window>,
    pub created_at_unix: Option<u64>,
    pub connection_id: String,
}

/// One window. Addressed by `(session_name, index)`; the index is positional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    pub id: String,
    pub index: u32,
    pub name: String,
    pub active: bool,
    /// Filled only by tree composition; empty after a plain listing.
    pub panes: Vec<Pane>,
    pub session_name: String,
    pub connection_id: String,
}

impl Window {
    /// `session:index` target for commands addressing this window.
    pub fn target(&self) -> String {
        format!("{}:{}", self.session_name, self.index)
    }
}

/// One pane. `id` (`%N`) is globally stable and preferred for addressing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pane {
    pub id: String,
    pub index: u32,
    pub active: bool,
    pub current_path: String,
    pub current_command: String,
    pub width: u32,
    pub height: u32,
    /// Window component used to list this pane (`@N` id or index).
    pub window_id: String,
    pub session_name: String,
    pub connection_id: String,
}

/// Axis for `split-window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    /// Side by side (`-h`).
    Horizontal,
    /// Stacked (`-v`).
    Vertical,
}

impl SplitDirection {
    pub(crate) fn flag(self) -> &'static str {
        match self {
            Self::Horizontal => "-h",
            Self::Vertical => "-v",
        }
    }
}

/// Neighbour to trade places with in `swap-pane`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    Previous,
    Next,
}

impl SwapDirection {
    pub(crate) fn flag(self) -> &'static str {
        match self {
            Self::Previous => "-U",
            Self::Next => "-D",
        }
    }
}

/// Edge to move in `resize-pane`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ResizeDirection {
    pub(crate) fn flag(self) -> &'static str {
        match self {
            Self::Up => "-U",
            Self::Down => "-D",
            Self::Left => "-L",
            Self::Right => "-R",
        }
    }
}
