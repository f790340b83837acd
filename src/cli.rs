//! CLI argument parsing via clap.

use clap::{Parser, Subcommand, ValueEnum};

use muxctl::build_info;
use muxctl::exec::LOCAL_CONNECTION;
use muxctl::tmux::{ResizeDirection, SwapDirection};

/// Inspect and drive tmux, and watch backend change events.
#[derive(Debug, Parser)]
#[command(
    name = "muxctl",
    version = build_info::VERSION,
    long_version = build_info::LONG_VERSION
)]
pub struct Args {
    /// Path to config file (default: ./muxctl.toml or ~/.config/muxctl/muxctl.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override the event server base URL.
    #[arg(long = "server-url", global = true)]
    pub server_url: Option<String>,

    /// Connection id commands are routed through.
    #[arg(long = "connection", global = true, default_value = LOCAL_CONNECTION)]
    pub connection: String,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Log at debug level unless MUXCTL_LOG/RUST_LOG says otherwise.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every session with its windows and panes.
    Tree {
        /// Emit JSON instead of an indented listing.
        #[arg(long)]
        json: bool,
    },
    /// List sessions.
    Sessions,
    /// List windows of a session.
    Windows { session: String },
    /// List panes of a window (index or `@N` id).
    Panes { session: String, window: String },
    /// Create a detached session.
    NewSession { name: Option<String> },
    /// Kill one or more sessions.
    KillSession {
        #[arg(required = true)]
        names: Vec<String>,
    },
    RenameSession { old: String, new: String },
    NewWindow {
        session: String,
        name: Option<String>,
    },
    /// Kill windows of a session, highest index first.
    KillWindow {
        session: String,
        #[arg(required = true)]
        indexes: Vec<u32>,
    },
    RenameWindow {
        session: String,
        index: u32,
        name: String,
    },
    SelectWindow { session: String, index: u32 },
    /// Split a pane or window (`session:window[.pane]` or `%N`).
    Split {
        target: String,
        /// Stack the new pane below instead of beside.
        #[arg(long)]
        vertical: bool,
    },
    /// Kill one or more panes.
    KillPane {
        #[arg(required = true)]
        panes: Vec<String>,
    },
    SelectPane { pane: String },
    SwapPane {
        pane: String,
        #[arg(long, value_enum)]
        direction: SwapArg,
    },
    ResizePane {
        pane: String,
        #[arg(value_enum)]
        direction: ResizeArg,
        /// Cells to move; defaults to `tmux.resize_amount`.
        amount: Option<u32>,
    },
    /// Query or change global mouse mode.
    Mouse {
        #[arg(value_enum)]
        action: MouseAction,
    },
    /// Print the command that attaches to a session.
    Attach { session: String },
    /// Stream change events until interrupted.
    Watch {
        /// Event kinds to print (default: all).
        #[arg(value_enum)]
        kinds: Vec<WatchKind>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SwapArg {
    Previous,
    Next,
}

impl From<SwapArg> for SwapDirection {
    fn from(arg: SwapArg) -> Self {
        match arg {
            SwapArg::Previous => Self::Previous,
            SwapArg::Next => Self::Next,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResizeArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<ResizeArg> for ResizeDirection {
    fn from(arg: ResizeArg) -> Self {
        match arg {
            ResizeArg::Up => Self::Up,
            ResizeArg::Down => Self::Down,
            ResizeArg::Left => Self::Left,
            ResizeArg::Right => Self::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MouseAction {
    On,
    Off,
    Toggle,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WatchKind {
    TicketUpdated,
    KnowledgeUpdated,
    SpecUpdated,
}

impl From<WatchKind> for muxctl::events::EventKind {
    fn from(kind: WatchKind) -> Self {
        match kind {
            WatchKind::TicketUpdated => Self::TicketUpdated,
            WatchKind::KnowledgeUpdated => Self::KnowledgeUpdated,
            WatchKind::SpecUpdated => Self::SpecUpdated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_subcommand() {
        let args = Args::parse_from(["muxctl", "sessions", "--connection", "box-1", "--no-color"]);
        assert_eq!(args.connection, "box-1");
        assert!(args.no_color);
        assert!(matches!(args.command, Command::Sessions));
    }

    #[test]
    fn connection_defaults_to_local() {
        let args = Args::parse_from(["muxctl", "tree", "--json"]);
        assert_eq!(args.connection, "local");
        assert!(matches!(args.command, Command::Tree { json: true }));
    }

    #[test]
    fn kill_window_takes_many_indexes() {
        let args = Args::parse_from(["muxctl", "kill-window", "dev", "0", "2", "3"]);
        match args.command {
            Command::KillWindow { session, indexes } => {
                assert_eq!(session, "dev");
                assert_eq!(indexes, vec![0, 2, 3]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn kill_pane_requires_a_target() {
        assert!(Args::try_parse_from(["muxctl", "kill-pane"]).is_err());
    }

    #[test]
    fn resize_amount_is_optional() {
        let args = Args::parse_from(["muxctl", "resize-pane", "%3", "left"]);
        match args.command {
            Command::ResizePane {
                pane,
                direction,
                amount,
            } => {
                assert_eq!(pane, "%3");
                assert_eq!(ResizeDirection::from(direction), ResizeDirection::Left);
                assert_eq!(amount, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn swap_direction_is_a_named_flag() {
        let args = Args::parse_from(["muxctl", "swap-pane", "%1", "--direction", "previous"]);
        assert!(matches!(
            args.command,
            Command::SwapPane {
                direction: SwapArg::Previous,
                ..
            }
        ));
    }

    #[test]
    fn watch_kinds_use_wire_names() {
        let args = Args::parse_from(["muxctl", "watch", "ticket-updated", "spec-updated"]);
        match args.command {
            Command::Watch { kinds } => {
                assert_eq!(kinds, vec![WatchKind::TicketUpdated, WatchKind::SpecUpdated]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn mouse_actions_parse() {
        let args = Args::parse_from(["muxctl", "mouse", "toggle"]);
        assert!(matches!(
            args.command,
            Command::Mouse {
                action: MouseAction::Toggle
            }
        ));
    }
}
