//! Task domain and intake validation.

mod book;
mod types;

pub use book::{load_task_file, TaskBook};
pub use types::{
    parse_deadline, Task, TaskDraft, TaskPatch, DEADLINE_FORMAT, MAX_IMPORTANCE, MIN_IMPORTANCE,
};
