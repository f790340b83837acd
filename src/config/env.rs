//! Environment overrides applied on top of the file config.

use super::Config;

/// Event server base URL override.
pub const SERVER_URL_ENV: &str = "MUXCTL_SERVER_URL";
/// tmux config file override.
pub const TMUX_CONF_ENV: &str = "MUXCTL_TMUX_CONF";

pub(super) fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_blank(env_lookup, SERVER_URL_ENV) {
        config.server.url = url;
    }
    if let Some(path) = non_blank(env_lookup, TMUX_CONF_ENV) {
        config.tmux.config_file = path;
    }
}

/// Trimmed env value; blank values count as unset.
fn non_blank<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
