//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`MUXCTL_SERVER_URL`, `MUXCTL_TMUX_CONF`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./muxctl.toml in the current directory
//! 4. $XDG_CONFIG_HOME/muxctl/muxctl.toml (or ~/.config/muxctl/muxctl.toml)
//! 5. Built-in defaults
//!
//! CLI flags such as `--server-url` are applied by the binary after loading.

mod defaults;
mod env;
mod loader;
mod sources;
mod types;

pub use env::{SERVER_URL_ENV, TMUX_CONF_ENV};
pub use loader::{load_config, LoadedConfig};
pub use sources::{config_root_dir, ConfigSource};
pub use types::{Config, EventsConfig, ServerConfig, TmuxConfig};
