use std::path::PathBuf;

use thiserror::Error;

/// Raised by task intake before a task ever reaches the planner.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("task name must not be empty")]
    EmptyName,

    #[error("duration must be a positive number of minutes, got {0}")]
    InvalidDuration(i64),

    #[error("importance must be between 1 and 5, got {0}")]
    InvalidImportance(i64),

    #[error("deadline '{0}' is not a YYYY-MM-DD date")]
    InvalidDeadline(String),

    #[error("task not found: {0}")]
    NotFound(String),

    #[error("cannot access task file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse task file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
