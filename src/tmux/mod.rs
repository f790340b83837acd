//! tmux control: listing into a session/window/pane tree and mutations.
//!
//! Nothing is cached. Each read issues fresh `list-*` commands through the
//! [`ConnectionManager`](crate::exec::ConnectionManager) and rebuilds the model.

mod batch;
mod commands;
mod controller;
mod mouse;
mod schema;
mod types;

pub use batch::{BatchOutcome, BatchReport};
pub use controller::{MultiplexerController, DEFAULT_TMUX_CONFIG_FILE};
pub use types::{Pane, ResizeDirection, Session, SplitDirection, SwapDirection, Window};
