use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TaskError;

pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 5;
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// One unit of work, already validated by intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub duration_minutes: u32,
    pub importance: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Free-form tags owned by collaborators; the planner never reads them.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Task {
    /// Build a task with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] when the duration is zero or the importance is
    /// outside `1..=5`.
    pub fn new(
        name: impl Into<String>,
        duration_minutes: u32,
        importance: u8,
        deadline: Option<NaiveDate>,
    ) -> Result<Self, TaskError> {
        TaskDraft {
            name: name.into(),
            duration_minutes: i64::from(duration_minutes),
            importance: i64::from(importance),
            deadline: deadline.map(|d| d.format(DEADLINE_FORMAT).to_string()),
            metadata: HashMap::new(),
        }
        .into_task()
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Re-run intake checks on a task read back from disk, keeping its id.
    pub fn validated(self) -> Result<Self, TaskError> {
        Ok(Self {
            name: validate_name(&self.name)?,
            duration_minutes: validate_duration(i64::from(self.duration_minutes))?,
            importance: validate_importance(i64::from(self.importance))?,
            ..self
        })
    }
}

/// Raw task input as typed by a user or read from a task file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub name: String,
    #[serde(alias = "duration")]
    pub duration_minutes: i64,
    pub importance: i64,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl TaskDraft {
    /// Validate the draft and assign an id.
    ///
    /// A blank deadline string counts as "no deadline".
    pub fn into_task(self) -> Result<Task, TaskError> {
        let name = validate_name(&self.name)?;
        let duration_minutes = validate_duration(self.duration_minutes)?;
        let importance = validate_importance(self.importance)?;
        let deadline = parse_deadline(self.deadline.as_deref())?;

        Ok(Task {
            id: Uuid::new_v4().to_string(),
            name,
            duration_minutes,
            importance,
            deadline,
            metadata: self.metadata,
        })
    }
}

/// Partial edit applied to an existing task before scheduling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub duration_minutes: Option<i64>,
    pub importance: Option<i64>,
    /// `Some(None)` clears the deadline.
    pub deadline: Option<Option<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.duration_minutes.is_none()
            && self.importance.is_none()
            && self.deadline.is_none()
    }

    /// Apply the patch, leaving `task` untouched when any field is invalid.
    pub fn apply(&self, task: &mut Task) -> Result<(), TaskError> {
        let name = self.name.as_deref().map(validate_name).transpose()?;
        let duration = self.duration_minutes.map(validate_duration).transpose()?;
        let importance = self.importance.map(validate_importance).transpose()?;
        let deadline = match &self.deadline {
            Some(raw) => Some(parse_deadline(raw.as_deref())?),
            None => None,
        };

        if let Some(name) = name {
            task.name = name;
        }
        if let Some(duration) = duration {
            task.duration_minutes = duration;
        }
        if let Some(importance) = importance {
            task.importance = importance;
        }
        if let Some(deadline) = deadline {
            task.deadline = deadline;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, TaskError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn validate_duration(minutes: i64) -> Result<u32, TaskError> {
    match u32::try_from(minutes) {
        Ok(m) if m > 0 => Ok(m),
        _ => Err(TaskError::InvalidDuration(minutes)),
    }
}

fn validate_importance(importance: i64) -> Result<u8, TaskError> {
    match u8::try_from(importance) {
        Ok(i) if (MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&i) => Ok(i),
        _ => Err(TaskError::InvalidImportance(importance)),
    }
}

pub fn parse_deadline(raw: Option<&str>) -> Result<Option<NaiveDate>, TaskError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, DEADLINE_FORMAT)
        .map(Some)
        .map_err(|_| TaskError::InvalidDeadline(raw.to_string()))
}
