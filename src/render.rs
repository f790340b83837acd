//! Plain-text terminal output for the CLI.
//!
//! Listings go to stdout; status, warnings, and errors go to stderr. Color is
//! applied with crossterm only when enabled, so the plain forms are what tests
//! and pipes see.

use crossterm::style::{Color, Stylize};

use crate::events::{ConnectionState, EventKind};
use crate::tmux::{Pane, Session, Window};

pub const INDENT_1: &str = "  ";
pub const INDENT_2: &str = "    ";

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";
pub const GLYPH_ACTIVE: &str = "*";
pub const GLYPH_BULLET: &str = "•";

/// Terminal renderer with optional color.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_ERROR.with(Color::Red).bold());
        } else {
            eprintln!("{LABEL_ERROR} {msg}");
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_WARNING.with(Color::Yellow).bold());
        } else {
            eprintln!("{LABEL_WARNING} {msg}");
        }
    }

    /// Outcome line for a mutation.
    pub fn done(&self, msg: &str) {
        if self.color {
            println!("{} {msg}", GLYPH_BULLET.with(Color::Green));
        } else {
            println!("{msg}");
        }
    }

    /// Raw text meant for scripts (e.g. an attach command).
    pub fn raw(&self, text: &str) {
        println!("{text}");
    }

    pub fn sessions(&self, sessions: &[Session]) {
        for session in sessions {
            self.line(0, &session.name, &session_detail(session));
        }
    }

    pub fn windows(&self, windows: &[Window]) {
        for window in windows {
            self.line(0, &window_label(window), &window_detail(window));
        }
    }

    pub fn panes(&self, panes: &[Pane]) {
        for pane in panes {
            self.line(0, &pane.id, &pane_detail(pane));
        }
    }

    /// Indented session > window > pane listing.
    pub fn tree(&self, sessions: &[Session]) {
        for session in sessions {
            self.line(0, &session.name, &session_detail(session));
            for window in &session.windows {
                self.line(1, &window_label(window), &window_detail(window));
                for pane in &window.panes {
                    self.line(2, &pane.id, &pane_detail(pane));
                }
            }
        }
    }

    pub fn event(&self, kind: EventKind) {
        if self.color {
            println!("{} {}", GLYPH_BULLET.with(Color::Cyan), kind.as_str().bold());
        } else {
            println!("{kind}");
        }
    }

    pub fn connection_state(&self, state: ConnectionState) {
        let text = format!("connection {state}");
        if self.color {
            eprintln!("{}", text.with(Color::DarkGrey));
        } else {
            eprintln!("{text}");
        }
    }

    fn line(&self, depth: usize, label: &str, detail: &str) {
        let indent = match depth {
            0 => "",
            1 => INDENT_1,
            _ => INDENT_2,
        };
        if self.color {
            let label = match depth {
                0 => label.with(Color::Blue).bold(),
                1 => label.with(Color::Magenta),
                _ => label.with(Color::Grey),
            };
            println!("{indent}{label} {}", detail.with(Color::DarkGrey));
        } else {
            println!("{}", plain_line(indent, label, detail));
        }
    }
}

fn plain_line(indent: &str, label: &str, detail: &str) -> String {
    format!("{indent}{label} {detail}")
}

fn active_marker(active: bool) -> &'static str {
    if active {
        GLYPH_ACTIVE
    } else {
        ""
    }
}

pub(crate) fn session_detail(session: &Session) -> String {
    let windows = if session.window_count == 1 { "window" } else { "windows" };
    let mut detail = format!("({} {windows}", session.window_count);
    if session.attached {
        detail.push_str(&format!(", {} attached", session.attached_count));
    }
    detail.push(')');
    detail
}

pub(crate) fn window_label(window: &Window) -> String {
    format!("{}:{}", window.index, window.name)
}

pub(crate) fn window_detail(window: &Window) -> String {
    format!("[{}]{}", window.id, active_marker(window.active))
}

pub(crate) fn pane_detail(pane: &Pane) -> String {
    format!(
        "{} {} {}x{}{}",
        pane.current_command,
        pane.current_path,
        pane.width,
        pane.height,
        active_marker(pane.active)
    )
}
