//! Configuration data model.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::events::Backoff;

use super::defaults::{
    DEFAULT_INITIAL_BACKOFF_MS, DEFAULT_MAX_BACKOFF_MS, DEFAULT_RESIZE_AMOUNT, DEFAULT_SERVER_URL,
    DEFAULT_TMUX_CONFIG_FILE,
};

/// Top-level runtime configuration. Missing sections and keys take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub tmux: TmuxConfig,
    pub events: EventsConfig,
}

/// `[server]`: backend that publishes change events.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

/// `[tmux]`: multiplexer-side settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TmuxConfig {
    /// File that persists `set -g mouse on`. A leading `~/` is expanded by the shell.
    pub config_file: String,
    /// Default cell count for `resize-pane`.
    pub resize_amount: u32,
}

impl Default for TmuxConfig {
    fn default() -> Self {
        Self {
            config_file: DEFAULT_TMUX_CONFIG_FILE.to_string(),
            resize_amount: DEFAULT_RESIZE_AMOUNT,
        }
    }
}

/// `[events]`: reconnect schedule for the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EventsConfig {
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            max_backoff_ms: DEFAULT_MAX_BACKOFF_MS,
        }
    }
}

impl EventsConfig {
    pub fn backoff(&self) -> Backoff {
        Backoff::new(
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
        )
    }
}
