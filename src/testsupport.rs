//! Shared test fixtures for executor, controller, and stream-client tests.
//!
//! Keeping the scripted executor and temp-dir fixture here stops each test
//! module from rebuilding its own fake tmux.

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::exec::{CommandExecutor, CommandResult};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "muxctl-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Build one stream frame with an `event:` line and a `data:` line.
pub fn sse_event_block(event: &str, data: &str) -> String {
    format!("event: {event}\ndata: {data}\n\n")
}

struct ScriptedRule {
    needle: String,
    result: CommandResult,
    once: bool,
}

/// Executor that records every command and answers from canned rules.
///
/// Rules match by substring in registration order; the first match wins.
/// Commands with no matching rule fail with exit code 1.
pub struct ScriptedExecutor {
    rules: Mutex<Vec<ScriptedRule>>,
    log: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Answer every command containing `needle` with `result`.
    pub fn respond(&self, needle: &str, result: CommandResult) {
        self.push_rule(needle, result, false);
    }

    /// Answer the next command containing `needle` with `result`, then forget the rule.
    pub fn respond_once(&self, needle: &str, result: CommandResult) {
        self.push_rule(needle, result, true);
    }

    /// All commands executed so far, in issue order.
    pub fn commands(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// Executed commands containing `needle`, in issue order.
    pub fn commands_containing(&self, needle: &str) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|command| command.contains(needle))
            .collect()
    }

    fn push_rule(&self, needle: &str, result: CommandResult, once: bool) {
        self.rules.lock().unwrap().push(ScriptedRule {
            needle: needle.to_string(),
            result,
            once,
        });
    }
}

impl Default for ScriptedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, command: &str) -> CommandResult {
        self.log.lock().unwrap().push(command.to_string());
        let mut rules = self.rules.lock().unwrap();
        let Some(pos) = rules.iter().position(|rule| command.contains(&rule.needle)) else {
            return CommandResult::failed(1, format!("no scripted response for `{command}`"));
        };
        if rules[pos].once {
            rules.remove(pos).result
        } else {
            rules[pos].result.clone()
        }
    }

    fn summary(&self) -> String {
        "scripted".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[tokio::test]
    async fn scripted_executor_prefers_once_rules_in_order_and_logs() {
        let exec = ScriptedExecutor::new();
        exec.respond_once("list", CommandResult::ok("first"));
        exec.respond("list", CommandResult::ok("always"));

        assert_eq!(exec.execute("tmux list-sessions").await.stdout, "first");
        assert_eq!(exec.execute("tmux list-sessions").await.stdout, "always");
        assert_eq!(exec.execute("tmux kill-server").await.exit_code, 1);
        assert_eq!(exec.commands().len(), 3);
        assert_eq!(exec.commands_containing("list").len(), 2);
    }
}
