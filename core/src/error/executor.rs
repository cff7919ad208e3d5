use thiserror::Error;

/// Executor-specific errors.
///
/// Tool and note-lookup failures never surface here: they are logged to the
/// run's sink and the item carries on. Only a broken worker pool aborts a run.
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("worker pool coordination failed: {0}")]
    Coordination(String),

    #[error("run produced {actual} results for {expected} scheduled items")]
    IncompleteRun { expected: usize, actual: usize },
}
