//! Command execution against local (and, later, remote) targets.
//!
//! Every multiplexer operation is threaded through a connection id. The
//! [`ConnectionManager`] resolves that id to a [`CommandExecutor`]; only the
//! local `sh -c` executor is built in.

mod contracts;
pub(crate) mod process;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub use contracts::CommandExecutor;
use process::run_sh_process;

/// Connection id of the built-in local executor.
pub const LOCAL_CONNECTION: &str = "local";

/// Structured, whitespace-trimmed output of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    /// Successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    /// Failed result with the given exit code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs commands through the local `sh`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalExecutor;

#[async_trait]
impl CommandExecutor for LocalExecutor {
    async fn execute(&self, command: &str) -> CommandResult {
        run_sh_process(command).await
    }

    fn summary(&self) -> String {
        "local".to_string()
    }
}

/// Routes `(connection_id, command)` pairs to registered executors.
pub struct ConnectionManager {
    local: Arc<dyn CommandExecutor>,
    registered: RwLock<HashMap<String, Arc<dyn CommandExecutor>>>,
}

impl ConnectionManager {
    /// Manager with only the local executor.
    pub fn local() -> Self {
        Self::with_local_executor(Arc::new(LocalExecutor))
    }

    /// Manager whose `local` connection uses the supplied executor.
    pub fn with_local_executor(local: Arc<dyn CommandExecutor>) -> Self {
        Self {
            local,
            registered: RwLock::new(HashMap::new()),
        }
    }

    /// Register (or replace) the executor for a non-local connection id.
    pub fn register(&self, connection_id: impl Into<String>, executor: Arc<dyn CommandExecutor>) {
        let connection_id = connection_id.into();
        tracing::debug!(connection = %connection_id, backend = %executor.summary(), "registering executor");
        if let Ok(mut registered) = self.registered.write() {
            registered.insert(connection_id, executor);
        }
    }

    /// Executor serving `connection_id`; unknown ids fall back to local.
    pub fn executor(&self, connection_id: &str) -> Arc<dyn CommandExecutor> {
        if connection_id != LOCAL_CONNECTION {
            if let Some(executor) = self
                .registered
                .read()
                .ok()
                .and_then(|registered| registered.get(connection_id).cloned())
            {
                return executor;
            }
            tracing::debug!(connection = %connection_id, "no executor registered, using local");
        }
        Arc::clone(&self.local)
    }

    /// Execute one command on the given connection.
    pub async fn execute(&self, connection_id: &str, command: &str) -> CommandResult {
        let executor = self.executor(connection_id);
        tracing::debug!(connection = %connection_id, %command, "executing");
        let result = executor.execute(command).await;
        if !result.success() {
            tracing::debug!(
                connection = %connection_id,
                exit_code = result.exit_code,
                stderr = %result.stderr,
                "command failed"
            );
        }
        result
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::ScriptedExecutor;

    #[tokio::test]
    async fn local_executor_reports_failures_as_results() {
        let result = LocalExecutor.execute("echo nope >&2; exit 2").await;
        assert!(!result.success());
        assert_eq!(result.exit_code, 2);
        assert_eq!(result.stderr, "nope");
    }

    #[tokio::test]
    async fn registered_connection_routes_to_its_executor() {
        let remote = Arc::new(ScriptedExecutor::new());
        remote.respond("echo hi", CommandResult::ok("from-remote"));
        let manager = ConnectionManager::with_local_executor(Arc::new(ScriptedExecutor::new()));
        manager.register("remote-1", remote.clone());

        let result = manager.execute("remote-1", "echo hi").await;
        assert_eq!(result.stdout, "from-remote");
        assert_eq!(remote.commands(), vec!["echo hi".to_string()]);
    }

    #[tokio::test]
    async fn unknown_connection_falls_back_to_local() {
        let local = Arc::new(ScriptedExecutor::new());
        local.respond("which", CommandResult::ok("/usr/bin/tmux"));
        let manager = ConnectionManager::with_local_executor(local.clone());

        let result = manager.execute("nowhere", "which tmux").await;
        assert_eq!(result.stdout, "/usr/bin/tmux");
        assert_eq!(local.commands().len(), 1);
    }
}
