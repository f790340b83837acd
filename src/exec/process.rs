//! Process spawning and shell-quoting helpers shared by executors.

use std::process::Stdio;
use tokio::process::Command;

use super::CommandResult;

/// Exit code reported when the process could not be spawned or awaited.
const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Run `sh -c <command>` locally.
pub(crate) async fn run_sh_process(command: &str) -> CommandResult {
    run_process("sh", &["-c".into(), command.into()]).await
}

/// Spawn and wait for a process, folding every failure into the result.
pub(crate) async fn run_process(program: &str, args: &[String]) -> CommandResult {
    let mut cmd = Command::new(program);
    // Dropping the owning future (e.g. an aborted batch) must not leak children.
    cmd.kill_on_drop(true);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = match cmd.output().await {
        Ok(output) => output,
        Err(e) => {
            return CommandResult {
                stdout: String::new(),
                stderr: format!("{program}: {e}"),
                exit_code: SPAWN_FAILURE_EXIT_CODE,
            }
        }
    };

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if exit_code != 0 && stderr.is_empty() {
        let invoked = args.last().map(String::as_str).unwrap_or(program);
        stderr = match output.status.code() {
            Some(code) => format!("command failed with exit code {code}: {invoked}"),
            None => format!("command terminated by signal: {invoked}"),
        };
    }

    CommandResult {
        stdout,
        stderr,
        exit_code,
    }
}

/// Shell-safe single-quote escaping.
pub(crate) fn shell_quote(s: &str) -> String {
    if s.is_empty() {
        "''".into()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

/// Quote a filesystem path, leaving a leading `~/` for the shell to expand.
///
/// The path is resolved on the executing side, so the home directory of the
/// target (not of this process) is used.
pub(crate) fn shell_path(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) if rest.is_empty() => "\"$HOME\"".to_string(),
        Some(rest) => format!("\"$HOME\"/{}", shell_quote(rest)),
        None if path == "~" => "\"$HOME\"".to_string(),
        None => shell_quote(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_empty() {
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn quote_with_single_quote() {
        assert_eq!(shell_quote("a'b"), "'a'\\''b'");
    }

    #[test]
    fn shell_path_expands_home_prefix_only() {
        assert_eq!(shell_path("~/.tmux.conf"), "\"$HOME\"/'.tmux.conf'");
        assert_eq!(shell_path("~"), "\"$HOME\"");
        assert_eq!(shell_path("/etc/tmux.conf"), "'/etc/tmux.conf'");
        assert_eq!(shell_path("dir/~/x"), "'dir/~/x'");
    }

    #[tokio::test]
    async fn run_sh_process_trims_output() {
        let result = run_sh_process("printf '  hello \\n\\n'").await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "hello");
        assert!(result.stderr.is_empty());
    }

    #[tokio::test]
    async fn nonzero_exit_without_stderr_gets_fallback_text() {
        let result = run_sh_process("exit 3").await;
        assert_eq!(result.exit_code, 3);
        assert!(
            result.stderr.contains("exit code 3"),
            "got: {}",
            result.stderr
        );
    }

    #[tokio::test]
    async fn nonzero_exit_keeps_process_stderr() {
        let result = run_sh_process("echo boom >&2; exit 1").await;
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.stderr, "boom");
    }

    #[tokio::test]
    async fn spawn_failure_is_captured_not_raised() {
        let result = run_process("muxctl-definitely-missing-binary", &[]).await;
        assert_ne!(result.exit_code, 0);
        assert!(result.stderr.contains("muxctl-definitely-missing-binary"));
    }
}
