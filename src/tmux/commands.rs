//! tmux command-line builders.
//!
//! Every builder returns the full `sh -c` text. Caller-supplied names and
//! targets are single-quoted so they can carry spaces and shell metacharacters.

use crate::exec::process::{shell_path, shell_quote};

use super::schema::{PANE_SCHEMA, SESSION_SCHEMA, WINDOW_SCHEMA};
use super::types::{ResizeDirection, SplitDirection, SwapDirection};

/// Line that turns mouse support on in a tmux config file.
pub(crate) const MOUSE_CONFIG_LINE: &str = "set -g mouse on";
/// Basic regex matching any line that already enables mouse support.
pub(crate) const MOUSE_CONFIG_PATTERN: &str = "^set.*-g.*mouse.*on";

pub(crate) fn availability() -> String {
    "command -v tmux".to_string()
}

pub(crate) fn list_sessions() -> String {
    format!(
        "tmux list-sessions -F {}",
        shell_quote(&SESSION_SCHEMA.format_string())
    )
}

pub(crate) fn list_windows(session: &str) -> String {
    format!(
        "tmux list-windows -t {} -F {}",
        shell_quote(session),
        shell_quote(&WINDOW_SCHEMA.format_string())
    )
}

pub(crate) fn list_panes(session: &str, window: &str) -> String {
    format!(
        "tmux list-panes -t {} -F {}",
        shell_quote(&format!("{session}:{window}")),
        shell_quote(&PANE_SCHEMA.format_string())
    )
}

pub(crate) fn new_session(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("tmux new-session -d -s {}", shell_quote(name)),
        None => "tmux new-session -d".to_string(),
    }
}

pub(crate) fn kill_session(name: &str) -> String {
    format!("tmux kill-session -t {}", shell_quote(name))
}

pub(crate) fn rename_session(old: &str, new: &str) -> String {
    format!(
        "tmux rename-session -t {} {}",
        shell_quote(old),
        shell_quote(new)
    )
}

pub(crate) fn new_window(session: &str, name: Option<&str>) -> String {
    let mut command = format!("tmux new-window -t {}", shell_quote(session));
    if let Some(name) = name {
        command.push_str(" -n ");
        command.push_str(&shell_quote(name));
    }
    command
}

pub(crate) fn kill_window(session: &str, index: u32) -> String {
    format!("tmux kill-window -t {}", window_target(session, index))
}

pub(crate) fn rename_window(session: &str, index: u32, name: &str) -> String {
    format!(
        "tmux rename-window -t {} {}",
        window_target(session, index),
        shell_quote(name)
    )
}

pub(crate) fn select_window(session: &str, index: u32) -> String {
    format!("tmux select-window -t {}", window_target(session, index))
}

pub(crate) fn split_window(target: &str, direction: SplitDirection) -> String {
    format!(
        "tmux split-window {} -t {}",
        direction.flag(),
        shell_quote(target)
    )
}

pub(crate) fn kill_pane(pane: &str) -> String {
    format!("tmux kill-pane -t {}", shell_quote(pane))
}

pub(crate) fn select_pane(pane: &str) -> String {
    format!("tmux select-pane -t {}", shell_quote(pane))
}

pub(crate) fn swap_pane(pane: &str, direction: SwapDirection) -> String {
    format!(
        "tmux swap-pane -t {} {}",
        shell_quote(pane),
        direction.flag()
    )
}

pub(crate) fn resize_pane(pane: &str, direction: ResizeDirection, amount: u32) -> String {
    format!(
        "tmux resize-pane -t {} {} {amount}",
        shell_quote(pane),
        direction.flag()
    )
}

pub(crate) fn attach_session(name: &str) -> String {
    format!("tmux attach-session -t {}", shell_quote(name))
}

pub(crate) fn show_mouse_option() -> String {
    "tmux show-options -g mouse".to_string()
}

/// Set the global mouse option; a missing server is not an error.
pub(crate) fn set_mouse_option(enabled: bool) -> String {
    let state = if enabled { "on" } else { "off" };
    format!("tmux set-option -g mouse {state} 2>/dev/null || true")
}

pub(crate) fn config_has_mouse_line(config_file: &str) -> String {
    format!(
        "grep -q {} {}",
        shell_quote(MOUSE_CONFIG_PATTERN),
        shell_path(config_file)
    )
}

pub(crate) fn append_mouse_line(config_file: &str) -> String {
    format!(
        "echo {} >> {}",
        shell_quote(MOUSE_CONFIG_LINE),
        shell_path(config_file)
    )
}

/// Drop every mouse-on line; succeeds when the file does not exist.
pub(crate) fn strip_mouse_lines(config_file: &str) -> String {
    let file = shell_path(config_file);
    let scratch = shell_path(&format!("{config_file}.muxctl.tmp"));
    format!(
        "if [ -f {file} ]; then grep -v {pattern} {file} > {scratch}; mv {scratch} {file}; fi",
        pattern = shell_quote(MOUSE_CONFIG_PATTERN),
    )
}

/// Reload the config into a running server; a missing server is not an error.
pub(crate) fn source_config(config_file: &str) -> String {
    format!(
        "tmux source-file {} 2>/dev/null || true",
        shell_path(config_file)
    )
}

fn window_target(session: &str, index: u32) -> String {
    shell_quote(&format!("{session}:{index}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_commands_embed_schema_formats() {
        assert_eq!(
            list_windows("work"),
            "tmux list-windows -t 'work' -F '#{window_id}:#{window_index}:#{window_name}:#{window_active}'"
        );
        assert!(list_panes("work", "@3").starts_with("tmux list-panes -t 'work:@3' -F '#{pane_id}"));
        assert!(list_sessions().contains("#{session_created}"));
    }

    #[test]
    fn session_commands_quote_names() {
        assert_eq!(new_session(None), "tmux new-session -d");
        assert_eq!(new_session(Some("my work")), "tmux new-session -d -s 'my work'");
        assert_eq!(
            rename_session("it's", "new"),
            "tmux rename-session -t 'it'\\''s' 'new'"
        );
        assert_eq!(attach_session("work"), "tmux attach-session -t 'work'");
    }

    #[test]
    fn window_commands_address_session_and_index() {
        assert_eq!(kill_window("dev", 2), "tmux kill-window -t 'dev:2'");
        assert_eq!(
            rename_window("dev", 0, "logs"),
            "tmux rename-window -t 'dev:0' 'logs'"
        );
        assert_eq!(new_window("dev", Some("db")), "tmux new-window -t 'dev' -n 'db'");
        assert_eq!(new_window("dev", None), "tmux new-window -t 'dev'");
    }

    #[test]
    fn pane_commands_map_directions_to_flags() {
        assert_eq!(
            split_window("dev:1", SplitDirection::Vertical),
            "tmux split-window -v -t 'dev:1'"
        );
        assert_eq!(
            swap_pane("%4", SwapDirection::Previous),
            "tmux swap-pane -t '%4' -U"
        );
        assert_eq!(
            resize_pane("%4", ResizeDirection::Right, 5),
            "tmux resize-pane -t '%4' -R 5"
        );
    }

    #[test]
    fn mouse_config_commands_expand_home_in_shell() {
        assert_eq!(
            config_has_mouse_line("~/.tmux.conf"),
            "grep -q '^set.*-g.*mouse.*on' \"$HOME\"/'.tmux.conf'"
        );
        assert_eq!(
            append_mouse_line("/tmp/t.conf"),
            "echo 'set -g mouse on' >> '/tmp/t.conf'"
        );
        assert_eq!(
            set_mouse_option(false),
            "tmux set-option -g mouse off 2>/dev/null || true"
        );
        let strip = strip_mouse_lines("/tmp/t.conf");
        assert!(strip.starts_with("if [ -f '/tmp/t.conf' ]"));
        assert!(strip.contains("grep -v '^set.*-g.*mouse.*on' '/tmp/t.conf' > '/tmp/t.conf.muxctl.tmp'"));
    }
}
