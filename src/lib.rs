//! muxctl: tmux control and backend change-event streaming.
//!
//! Two independent pieces:
//! - [`tmux::MultiplexerController`] lists sessions, windows, and panes by
//!   parsing `tmux list-*` output and issues mutations, including concurrent
//!   batch deletions ordered against index shifting.
//! - [`events::StreamEventClient`] holds a long-lived event stream, dispatches
//!   typed notifications, and reconnects with exponential backoff.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use muxctl::exec::{ConnectionManager, LOCAL_CONNECTION};
//! use muxctl::tmux::MultiplexerController;
//!
//! # async fn example() {
//! let controller = MultiplexerController::new(Arc::new(ConnectionManager::local()));
//! for session in controller.session_tree(LOCAL_CONNECTION).await {
//!     println!("{} ({} windows)", session.name, session.windows.len());
//! }
//! # }
//! ```

pub mod build_info;
pub mod config;
pub mod error;
pub mod events;
pub mod exec;
pub mod render;
#[cfg(test)]
pub mod testsupport;
pub mod tmux;
