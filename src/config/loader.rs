//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::env::apply_env_overrides;
use super::sources::{config_root_dir, read_config_text_with_sources, ConfigSource};
use super::Config;

/// Resolved configuration plus the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&text)?;
    apply_env_overrides(&mut config, &env_lookup);
    validate(&config)?;
    tracing::debug!(%source, "configuration loaded");
    Ok(LoadedConfig { config, source })
}

impl Config {
    /// Re-check a config after callers apply their own overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.server.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "server.url `{url}` must start with http:// or https://"
        )));
    }
    if config.tmux.config_file.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "tmux.config_file must not be empty".to_string(),
        ));
    }
    if config.tmux.resize_amount == 0 {
        return Err(ConfigError::Invalid(
            "tmux.resize_amount must be at least 1".to_string(),
        ));
    }
    if config.events.initial_backoff_ms == 0 {
        return Err(ConfigError::Invalid(
            "events.initial_backoff_ms must be at least 1".to_string(),
        ));
    }
    if config.events.max_backoff_ms < config.events.initial_backoff_ms {
        return Err(ConfigError::Invalid(format!(
            "events.max_backoff_ms ({}) is below events.initial_backoff_ms ({})",
            config.events.max_backoff_ms, config.events.initial_backoff_ms
        )));
    }
    Ok(())
}
