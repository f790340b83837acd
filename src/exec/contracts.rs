//! Executor contract shared by the connection manager and its backends.

use async_trait::async_trait;

use super::CommandResult;

/// Runs one shell command string against a target environment.
///
/// Implementations never fail: spawn errors and nonzero exits are both
/// reported through [`CommandResult::exit_code`] and [`CommandResult::stderr`].
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute `command` and return its trimmed output.
    async fn execute(&self, command: &str) -> CommandResult;

    /// Short human-readable backend label for logs.
    fn summary(&self) -> String;
}
