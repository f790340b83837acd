//! Concurrent multi-target deletions with settled, aggregated results.
//!
//! Window indexes shift when a lower sibling disappears, so window targets are
//! issued highest index first. Pane ids are ordered the same way by their
//! trailing number. Every target is attempted; one failure never cancels the
//! rest.

use futures::future::join_all;
use std::cmp::Reverse;

use crate::error::MuxError;

use super::controller::MultiplexerController;

/// Outcome of one target in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub target: String,
    pub result: Result<(), MuxError>,
}

/// Settled per-target results, in issue order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// One-line summary, e.g. `2 windows deleted, 1 failed`.
    pub fn summary(&self, noun: &str, verb: &str) -> String {
        let succeeded = self.succeeded();
        let plural = if succeeded == 1 { "" } else { "s" };
        let mut line = format!("{succeeded} {noun}{plural} {verb}");
        let failed = self.failed();
        if failed > 0 {
            line.push_str(&format!(", {failed} failed"));
        }
        line
    }
}

impl MultiplexerController {
    /// Kill sessions by name, in the given order.
    pub async fn kill_sessions(&self, connection_id: &str, names: &[String]) -> BatchReport {
        let targets = dedup(names.to_vec());
        let futures = targets
            .iter()
            .map(|name| self.kill_session(connection_id, name));
        settle(targets.iter().cloned(), join_all(futures).await, "session")
    }

    /// Kill `(session, index)` windows, highest index first.
    pub async fn kill_windows(&self, connection_id: &str, windows: &[(String, u32)]) -> BatchReport {
        let mut targets = windows.to_vec();
        targets.sort_by_key(|(_, index)| Reverse(*index));
        let targets = dedup(targets);
        let futures = targets
            .iter()
            .map(|(session, index)| self.kill_window(connection_id, session, *index));
        let labels = targets.iter().map(|(session, index)| format!("{session}:{index}"));
        settle(labels, join_all(futures).await, "window")
    }

    /// Kill panes, highest trailing number first.
    pub async fn kill_panes(&self, connection_id: &str, panes: &[String]) -> BatchReport {
        let mut targets = panes.to_vec();
        targets.sort_by_key(|pane| Reverse(trailing_number(pane)));
        let targets = dedup(targets);
        let futures = targets
            .iter()
            .map(|pane| self.kill_pane(connection_id, pane));
        settle(targets.iter().cloned(), join_all(futures).await, "pane")
    }
}

/// Number after the last `.` or `%` of a pane target, 0 if absent.
pub(crate) fn trailing_number(target: &str) -> u64 {
    target
        .rfind(['.', '%'])
        .and_then(|pos| target[pos + 1..].parse().ok())
        .unwrap_or(0)
}

/// Remove repeated targets, keeping the first occurrence.
fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

fn settle(
    labels: impl Iterator<Item = String>,
    results: Vec<Result<(), MuxError>>,
    kind: &str,
) -> BatchReport {
    let outcomes = labels
        .zip(results)
        .map(|(target, result)| {
            if let Err(err) = &result {
                tracing::warn!(%target, kind, error = %err, "batch item failed");
            }
            BatchOutcome { target, result }
        })
        .collect();
    BatchReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{CommandResult, ConnectionManager, LOCAL_CONNECTION};
    use crate::testsupport::ScriptedExecutor;
    use std::sync::Arc;

    fn controller_with(exec: Arc<ScriptedExecutor>) -> MultiplexerController {
        MultiplexerController::new(Arc::new(ConnectionManager::with_local_executor(exec)))
    }

    #[test]
    fn trailing_number_reads_last_component() {
        assert_eq!(trailing_number("%12"), 12);
        assert_eq!(trailing_number("w.3"), 3);
        assert_eq!(trailing_number("work:1.2"), 2);
        assert_eq!(trailing_number("pane"), 0);
        assert_eq!(trailing_number("%x"), 0);
    }

    #[tokio::test]
    async fn windows_are_killed_highest_index_first() {
        let exec = Arc::new(ScriptedExecutor::new());
        exec.respond("kill-window", CommandResult::ok(""));
        let controller = controller_with(exec.clone());

        let targets = vec![
            ("dev".to_string(), 0),
            ("dev".to_string(), 2),
            ("dev".to_string(), 3),
        ];
        let report = controller.kill_windows(LOCAL_CONNECTION, &targets).await;

        assert_eq!(
            exec.commands(),
            vec![
                "tmux kill-window -t 'dev:3'",
                "tmux kill-window -t 'dev:2'",
                "tmux kill-window -t 'dev:0'",
            ]
        );
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.summary("window", "deleted"), "3 windows deleted");
    }

    #[tokio::test]
    async fn partial_failure_is_counted_not_raised() {
        let exec = Arc::new(ScriptedExecutor::new());
        exec.respond("'dev:1'", CommandResult::failed(1, "index in use"));
        exec.respond("kill-window", CommandResult::ok(""));
        let controller = controller_with(exec.clone());

        let targets = vec![
            ("dev".to_string(), 1),
            ("dev".to_string(), 4),
            ("dev".to_string(), 2),
        ];
        let report = controller.kill_windows(LOCAL_CONNECTION, &targets).await;

        assert_eq!(exec.commands().len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.summary("window", "deleted"), "2 windows deleted, 1 failed");
        assert_eq!(report.outcomes[2].target, "dev:1");
    }

    #[tokio::test]
    async fn panes_sort_by_trailing_number_and_collapse_duplicates() {
        let exec = Arc::new(ScriptedExecutor::new());
        exec.respond("kill-pane", CommandResult::ok(""));
        let controller = controller_with(exec.clone());

        let panes = vec!["%2".to_string(), "%10".to_string(), "%2".to_string(), "%7".to_string()];
        let report = controller.kill_panes(LOCAL_CONNECTION, &panes).await;

        assert_eq!(
            exec.commands(),
            vec![
                "tmux kill-pane -t '%10'",
                "tmux kill-pane -t '%7'",
                "tmux kill-pane -t '%2'",
            ]
        );
        assert_eq!(report.summary("pane", "closed"), "3 panes closed");
    }

    #[tokio::test]
    async fn sessions_keep_input_order() {
        let exec = Arc::new(ScriptedExecutor::new());
        exec.respond("kill-session", CommandResult::ok(""));
        let controller = controller_with(exec.clone());

        let names = vec!["b".to_string(), "a".to_string()];
        let report = controller.kill_sessions(LOCAL_CONNECTION, &names).await;

        assert_eq!(
            exec.commands(),
            vec!["tmux kill-session -t 'b'", "tmux kill-session -t 'a'"]
        );
        assert_eq!(report.summary("session", "killed"), "2 sessions killed");
    }

    #[test]
    fn single_success_summary_is_singular() {
        let report = BatchReport {
            outcomes: vec![BatchOutcome {
                target: "%1".into(),
                result: Ok(()),
            }],
        };
        assert_eq!(report.summary("pane", "closed"), "1 pane closed");
    }
}
