//! Listing and single-target mutations over a [`ConnectionManager`].

use std::sync::Arc;

use crate::error::MuxError;
use crate::exec::{CommandResult, ConnectionManager};

use super::commands;
use super::schema::{PANE_SCHEMA, SESSION_SCHEMA, WINDOW_SCHEMA};
use super::types::{Pane, ResizeDirection, Session, SplitDirection, SwapDirection, Window};

/// Default per-user tmux configuration file touched by mouse-mode changes.
pub const DEFAULT_TMUX_CONFIG_FILE: &str = "~/.tmux.conf";

/// Stateless tmux front end. Every read rebuilds the model from a fresh listing.
pub struct MultiplexerController {
    connections: Arc<ConnectionManager>,
    pub(crate) config_file: String,
}

impl MultiplexerController {
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self {
            connections,
            config_file: DEFAULT_TMUX_CONFIG_FILE.to_string(),
        }
    }

    /// Use a different tmux config file for mouse-mode persistence.
    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = path.into();
        self
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// Whether a `tmux` binary is reachable on the connection.
    pub async fn is_available(&self, connection_id: &str) -> bool {
        let result = self.run(connection_id, &commands::availability()).await;
        result.success() && !result.stdout.is_empty()
    }

    pub async fn list_sessions(&self, connection_id: &str) -> Vec<Session> {
        let Some(output) = self.listing(connection_id, &commands::list_sessions()).await else {
            return Vec::new();
        };
        SESSION_SCHEMA
            .parse_lines(&output)
            .map(|record| Session {
                id: record.string("session_id"),
                name: record.string("session_name"),
                attached: record.flag("session_attached"),
                attached_count: record.int("session_attached"),
                window_count: record.int("session_windows"),
                windows: Vec::new(),
                created_at_unix: record.opt_u64("session_created"),
                connection_id: connection_id.to_string(),
            })
            .collect()
    }

    pub async fn list_windows(&self, connection_id: &str, session: &str) -> Vec<Window> {
        let Some(output) = self
            .listing(connection_id, &commands::list_windows(session))
            .await
        else {
            return Vec::new();
        };
        WINDOW_SCHEMA
            .parse_lines(&output)
            .map(|record| Window {
                id: record.string("window_id"),
                index: record.int("window_index"),
                name: record.string("window_name"),
                active: record.flag("window_active"),
                panes: Vec::new(),
                session_name: session.to_string(),
                connection_id: connection_id.to_string(),
            })
            .collect()
    }

    /// Panes of one window; `window` is an index or an `@N` window id.
    pub async fn list_panes(&self, connection_id: &str, session: &str, window: &str) -> Vec<Pane> {
        let Some(output) = self
            .listing(connection_id, &commands::list_panes(session, window))
            .await
        else {
            return Vec::new();
        };
        PANE_SCHEMA
            .parse_lines(&output)
            .map(|record| {
                let path = record.text("pane_current_path");
                Pane {
                    id: record.string("pane_id"),
                    index: record.int("pane_index"),
                    active: record.flag("pane_active"),
                    current_path: if path.is_empty() { "~".into() } else { path.into() },
                    current_command: record.string("pane_current_command"),
                    width: record.int("pane_width"),
                    height: record.int("pane_height"),
                    window_id: window.to_string(),
                    session_name: session.to_string(),
                    connection_id: connection_id.to_string(),
                }
            })
            .collect()
    }

    /// Sessions with windows and panes filled in, listed parent-first.
    pub async fn session_tree(&self, connection_id: &str) -> Vec<Session> {
        let mut sessions = self.list_sessions(connection_id).await;
        for session in &mut sessions {
            let mut windows = self.list_windows(connection_id, &session.name).await;
            for window in &mut windows {
                window.panes = self
                    .list_panes(connection_id, &session.name, &window.id)
                    .await;
            }
            session.windows = windows;
        }
        sessions
    }

    /// Create a detached session and return it from a fresh listing.
    ///
    /// Without a name the newest session is assumed to be the last one listed,
    /// which can pick up a session created concurrently by someone else.
    pub async fn create_session(
        &self,
        connection_id: &str,
        name: Option<&str>,
    ) -> Result<Option<Session>, MuxError> {
        self.mutate(
            connection_id,
            &commands::new_session(name),
            "Failed to create session",
        )
        .await?;
        let sessions = self.list_sessions(connection_id).await;
        Ok(match name {
            Some(name) => sessions.into_iter().find(|session| session.name == name),
            None => sessions.into_iter().last(),
        })
    }

    pub async fn kill_session(&self, connection_id: &str, name: &str) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::kill_session(name),
            "Failed to kill session",
        )
        .await
    }

    pub async fn rename_session(
        &self,
        connection_id: &str,
        old: &str,
        new: &str,
    ) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::rename_session(old, new),
            "Failed to rename session",
        )
        .await
    }

    pub async fn create_window(
        &self,
        connection_id: &str,
        session: &str,
        name: Option<&str>,
    ) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::new_window(session, name),
            "Failed to create window",
        )
        .await
    }

    pub async fn kill_window(
        &self,
        connection_id: &str,
        session: &str,
        index: u32,
    ) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::kill_window(session, index),
            "Failed to kill window",
        )
        .await
    }

    pub async fn rename_window(
        &self,
        connection_id: &str,
        session: &str,
        index: u32,
        name: &str,
    ) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::rename_window(session, index, name),
            "Failed to rename window",
        )
        .await
    }

    pub async fn select_window(
        &self,
        connection_id: &str,
        session: &str,
        index: u32,
    ) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::select_window(session, index),
            "Failed to select window",
        )
        .await
    }

    /// Split the pane or window named by `target` (`session:window[.pane]` or `%N`).
    pub async fn split_pane(
        &self,
        connection_id: &str,
        target: &str,
        direction: SplitDirection,
    ) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::split_window(target, direction),
            "Failed to split pane",
        )
        .await
    }

    pub async fn kill_pane(&self, connection_id: &str, pane: &str) -> Result<(), MuxError> {
        self.mutate(connection_id, &commands::kill_pane(pane), "Failed to kill pane")
            .await
    }

    pub async fn select_pane(&self, connection_id: &str, pane: &str) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::select_pane(pane),
            "Failed to select pane",
        )
        .await
    }

    pub async fn swap_pane(
        &self,
        connection_id: &str,
        pane: &str,
        direction: SwapDirection,
    ) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::swap_pane(pane, direction),
            "Failed to swap pane",
        )
        .await
    }

    pub async fn resize_pane(
        &self,
        connection_id: &str,
        pane: &str,
        direction: ResizeDirection,
        amount: u32,
    ) -> Result<(), MuxError> {
        self.mutate(
            connection_id,
            &commands::resize_pane(pane, direction, amount),
            "Failed to resize pane",
        )
        .await
    }

    /// Shell text that attaches a terminal to `session`. Not executed here.
    pub fn attach_command(&self, session: &str) -> String {
        commands::attach_session(session)
    }

    pub(crate) async fn run(&self, connection_id: &str, command: &str) -> CommandResult {
        self.connections.execute(connection_id, command).await
    }

    /// Stdout of a successful, non-empty listing.
    async fn listing(&self, connection_id: &str, command: &str) -> Option<String> {
        let result = self.run(connection_id, command).await;
        (result.success() && !result.stdout.is_empty()).then_some(result.stdout)
    }

    pub(crate) async fn mutate(
        &self,
        connection_id: &str,
        command: &str,
        default_message: &str,
    ) -> Result<(), MuxError> {
        let result = self.run(connection_id, command).await;
        if result.success() {
            return Ok(());
        }
        let message = if result.stderr.is_empty() {
            default_message.to_string()
        } else {
            result.stderr
        };
        Err(MuxError::Execution(message))
    }
}
