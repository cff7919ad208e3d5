//! File-backed task list used by the intake commands.
//!
//! The book is a plain JSON array of [`Task`] values. Task files handed to
//! `plan`/`run` may also be TOML (`[[tasks]]` drafts) or JSON drafts without
//! ids. Every entry is validated on load, stored tasks included.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::TaskError;

use super::types::{Task, TaskDraft, TaskPatch};

#[derive(Debug, Clone, Default)]
pub struct TaskBook {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskBook {
    /// Open the book at `path`; a missing file yields an empty book.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TaskError> {
        let path = path.into();
        let tasks = if path.exists() {
            load_task_file(&path)?
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), count = tasks.len(), "task book opened");
        Ok(Self { path, tasks })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id or unique id prefix.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.position(id).ok().map(|idx| &self.tasks[idx])
    }

    pub fn add(&mut self, draft: TaskDraft) -> Result<&Task, TaskError> {
        let task = draft.into_task()?;
        tracing::info!(id = %task.id, name = %task.name, "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Edit a task in place. `id` may be a unique prefix.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<&Task, TaskError> {
        let idx = self.position(id)?;
        patch.apply(&mut self.tasks[idx])?;
        tracing::info!(id = %self.tasks[idx].id, "task updated");
        Ok(&self.tasks[idx])
    }

    pub fn remove(&mut self, id: &str) -> Result<Task, TaskError> {
        let idx = self.position(id)?;
        let task = self.tasks.remove(idx);
        tracing::info!(id = %task.id, name = %task.name, "task removed");
        Ok(task)
    }

    pub fn save(&self) -> Result<(), TaskError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| TaskError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.tasks).map_err(|e| TaskError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, json).map_err(|source| TaskError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn position(&self, id: &str) -> Result<usize, TaskError> {
        if id.is_empty() {
            return Err(TaskError::NotFound(id.to_string()));
        }
        if let Some(idx) = self.tasks.iter().position(|t| t.id == id) {
            return Ok(idx);
        }
        let mut matches = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some((idx, _)), None) => Ok(idx),
            _ => Err(TaskError::NotFound(id.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskEntry {
    Stored(Task),
    Draft(TaskDraft),
}

impl TaskEntry {
    fn into_task(self) -> Result<Task, TaskError> {
        match self {
            Self::Stored(task) => task.validated(),
            Self::Draft(draft) => draft.into_task(),
        }
    }
}

#[derive(Deserialize)]
struct TomlTaskFile {
    #[serde(default)]
    tasks: Vec<TaskDraft>,
}

/// Read tasks from a JSON or TOML file, validating every entry.
pub fn load_task_file(path: &Path) -> Result<Vec<Task>, TaskError> {
    let raw = std::fs::read_to_string(path).map_err(|source| TaskError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |message: String| TaskError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    if is_toml {
        let file: TomlTaskFile = toml::from_str(&raw).map_err(|e| parse_err(e.to_string()))?;
        return file.tasks.into_iter().map(TaskDraft::into_task).collect();
    }

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Vec<TaskEntry> =
        serde_json::from_str(&raw).map_err(|e| parse_err(e.to_string()))?;
    entries.into_iter().map(TaskEntry::into_task).collect()
}
