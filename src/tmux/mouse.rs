//! Global mouse-mode state, persisted in the per-user tmux config file.

use crate::error::MuxError;

use super::commands;
use super::controller::MultiplexerController;

impl MultiplexerController {
    /// Current value of the server's global `mouse` option.
    pub async fn is_mouse_enabled(&self, connection_id: &str) -> bool {
        let result = self.run(connection_id, &commands::show_mouse_option()).await;
        result.success() && parse_mouse_option(&result.stdout)
    }

    /// Persist `set -g mouse on` once, reload it, and turn the option on.
    pub async fn enable_mouse_mode(&self, connection_id: &str) -> Result<(), MuxError> {
        let probe = self
            .run(connection_id, &commands::config_has_mouse_line(&self.config_file))
            .await;
        if !probe.success() {
            self.mutate(
                connection_id,
                &commands::append_mouse_line(&self.config_file),
                "Failed to update tmux config",
            )
            .await?;
            tracing::info!(config = %self.config_file, "mouse mode persisted");
        }

        let reload = self
            .run(connection_id, &commands::source_config(&self.config_file))
            .await;
        if !reload.success() {
            tracing::debug!(stderr = %reload.stderr, "config reload skipped");
        }

        self.mutate(
            connection_id,
            &commands::set_mouse_option(true),
            "Failed to enable mouse mode",
        )
        .await
    }

    /// Remove persisted mouse lines and turn the option off.
    pub async fn disable_mouse_mode(&self, connection_id: &str) -> Result<(), MuxError> {
        let strip = self
            .run(connection_id, &commands::strip_mouse_lines(&self.config_file))
            .await;
        if !strip.success() {
            tracing::warn!(
                config = %self.config_file,
                stderr = %strip.stderr,
                "could not remove mouse lines from tmux config"
            );
        }

        self.mutate(
            connection_id,
            &commands::set_mouse_option(false),
            "Failed to disable mouse mode",
        )
        .await
    }

    /// Flip mouse mode and return the new state.
    pub async fn toggle_mouse_mode(&self, connection_id: &str) -> Result<bool, MuxError> {
        if self.is_mouse_enabled(connection_id).await {
            self.disable_mouse_mode(connection_id).await?;
            Ok(false)
        } else {
            self.enable_mouse_mode(connection_id).await?;
            Ok(true)
        }
    }
}

/// `show-options -g mouse` prints `mouse on` or `mouse off`.
fn parse_mouse_option(stdout: &str) -> bool {
    stdout.lines().any(|line| {
        let mut parts = line.split_whitespace();
        parts.next() == Some("mouse") && parts.next() == Some("on")
    })
}
