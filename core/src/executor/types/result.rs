use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionMode {
    Sequential,
    Parallel { max_workers: usize },
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel { max_workers } => write!(f, "parallel(max_workers={max_workers})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Done,
    Backlog,
}

/// Outcome of processing one scheduled item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub task_id: String,
    pub status: ExecutionStatus,
}

impl ExecutionResult {
    pub fn done(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: ExecutionStatus::Done,
        }
    }

    pub fn backlog(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: ExecutionStatus::Backlog,
        }
    }
}

/// Result of executing a whole schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub mode: ExecutionMode,

    /// One entry per scheduled item. Parallel runs list them in completion order.
    pub results: Vec<ExecutionResult>,

    pub done: usize,
    pub backlog: usize,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl RunReport {
    pub fn new(
        run_id: String,
        mode: ExecutionMode,
        results: Vec<ExecutionResult>,
        duration_ms: u64,
    ) -> Self {
        let done = results
            .iter()
            .filter(|r| r.status == ExecutionStatus::Done)
            .count();
        let backlog = results.len() - done;
        Self {
            run_id,
            mode,
            results,
            done,
            backlog,
            duration_ms,
        }
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn status_of(&self, task_id: &str) -> Option<ExecutionStatus> {
        self.results
            .iter()
            .find(|r| r.task_id == task_id)
            .map(|r| r.status)
    }
}
