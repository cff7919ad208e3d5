//! Schedule execution.
//!
//! ```text
//! &[ScheduledItem]
//!   ↓
//! Executor::run(mode)
//!   ├─ Sequential: one item at a time, schedule order
//!   └─ Parallel:   Semaphore(max_workers) + FuturesUnordered
//!   ↓                 (admission in schedule order, results in completion order)
//! per item: backlog → skip line
//!           placed  → start, tool, notes, working ticks, finished
//!   ↓
//! RunReport { results, done, backlog }
//! ```

mod engine;
mod output;
mod progress;
mod scheduler;
pub mod traits;
pub mod types;

pub use engine::Executor;
pub use output::Markers;
pub use progress::ProgressMonitor;
pub use scheduler::execute_parallel;
pub use traits::{CapturedLine, LogLine, LogSink, MemorySink};
pub use types::{
    ExecutionMode, ExecutionResult, ExecutionStatus, ExecutorConfig, ModeKind, PacingConfig,
    RunReport,
};
