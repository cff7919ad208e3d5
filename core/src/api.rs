//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `dayplan_core::api` instead of reaching into internal modules.

pub use crate::config::{
    expand_path, load_default, load_from_path, AppConfig, EmbeddingConfig, EmbeddingProvider,
    LoggingConfig, NotesConfig, NotesStrategy, TasksConfig, ToolsConfig,
};
pub use crate::context::{AppContext, Services, ServicesFactory};
pub use crate::error::{CliError, ExecutorError, TaskError};
pub use crate::executor::{
    CapturedLine, ExecutionMode, ExecutionResult, ExecutionStatus, Executor, ExecutorConfig,
    LogLine, LogSink, Markers, MemorySink, ModeKind, PacingConfig, RunReport,
};
pub use crate::notes::{
    chunk_text, render_hits, truncate_chars, DocumentChunk, NoteHit, NoteLookup,
    DEFAULT_CHUNK_SIZE, NO_NOTES_CONFIGURED, NO_RELEVANT_NOTES,
};
pub use crate::planner::{plan, Planner, PlannerConfig, Schedule, ScheduledItem, TimeSlot};
pub use crate::task::{
    load_task_file, parse_deadline, Task, TaskBook, TaskDraft, TaskPatch, DEADLINE_FORMAT,
};
pub use crate::tools::{first_result, Tool, ToolError, ToolRegistry};
