//! Default configuration constants.

/// Event server base URL.
pub(super) const DEFAULT_SERVER_URL: &str = crate::events::DEFAULT_SERVER_URL;
/// Per-user tmux config file touched by mouse-mode changes.
pub(super) const DEFAULT_TMUX_CONFIG_FILE: &str = crate::tmux::DEFAULT_TMUX_CONFIG_FILE;
/// Cells moved by `resize-pane` when no amount is given.
pub(super) const DEFAULT_RESIZE_AMOUNT: u32 = 5;
/// First reconnect delay for the event stream.
pub(super) const DEFAULT_INITIAL_BACKOFF_MS: u64 =
    crate::events::DEFAULT_INITIAL_BACKOFF.as_millis() as u64;
/// Reconnect delay ceiling for the event stream.
pub(super) const DEFAULT_MAX_BACKOFF_MS: u64 = crate::events::DEFAULT_MAX_BACKOFF.as_millis() as u64;

/// Local config file name, also used under the global config dir.
pub(super) const CONFIG_FILE_NAME: &str = "muxctl.toml";
/// Directory under the global config root.
pub(super) const CONFIG_DIR_NAME: &str = "muxctl";
