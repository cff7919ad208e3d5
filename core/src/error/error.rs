use thiserror::Error;

use super::{ExecutorError, TaskError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("task input error: {0}")]
    Task(#[from] TaskError),
    #[error("executor failed: {0}")]
    Executor(#[from] ExecutorError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// 11: config, 12: task input, 20: io / command, 50: internal.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 11,
            Self::Task(TaskError::Io { .. }) => 20,
            Self::Task(_) => 12,
            Self::Executor(_) => 50,
            Self::Command(_) => 20,
            Self::Io(_) => 20,
            Self::Anyhow(_) => 50,
        }
    }
}
