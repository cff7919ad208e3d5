use chrono::NaiveDateTime;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::task::Task;

/// Half-open wall-clock interval `[start, end)` assigned to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSlot {
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A task placed in the day, or left in the backlog (`slot == None`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledItem<'a> {
    pub task: &'a Task,
    pub slot: Option<TimeSlot>,
}

impl<'a> ScheduledItem<'a> {
    pub fn scheduled(task: &'a Task, slot: TimeSlot) -> Self {
        Self {
            task,
            slot: Some(slot),
        }
    }

    pub fn backlog(task: &'a Task) -> Self {
        Self { task, slot: None }
    }

    pub fn is_backlog(&self) -> bool {
        self.slot.is_none()
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.slot.map(|s| s.start)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.slot.map(|s| s.end)
    }
}

impl Serialize for ScheduledItem<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Row<'r> {
            task_id: &'r str,
            name: &'r str,
            importance: u8,
            duration_minutes: u32,
            start: Option<NaiveDateTime>,
            end: Option<NaiveDateTime>,
        }

        Row {
            task_id: &self.task.id,
            name: &self.task.name,
            importance: self.task.importance,
            duration_minutes: self.task.duration_minutes,
            start: self.start(),
            end: self.end(),
        }
        .serialize(serializer)
    }
}

/// Ordered output of one planner run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule<'a> {
    items: Vec<ScheduledItem<'a>>,
}

impl<'a> Schedule<'a> {
    pub(crate) fn from_items(items: Vec<ScheduledItem<'a>>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ScheduledItem<'a>] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledItem<'a>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn scheduled(&self) -> impl Iterator<Item = &ScheduledItem<'a>> {
        self.items.iter().filter(|i| !i.is_backlog())
    }

    pub fn backlog(&self) -> impl Iterator<Item = &ScheduledItem<'a>> {
        self.items.iter().filter(|i| i.is_backlog())
    }

    /// Minutes consumed by placed tasks.
    pub fn total_minutes(&self) -> u32 {
        self.scheduled().map(|i| i.task.duration_minutes).sum()
    }
}

impl<'a> AsRef<[ScheduledItem<'a>]> for Schedule<'a> {
    fn as_ref(&self) -> &[ScheduledItem<'a>] {
        &self.items
    }
}

impl<'s, 'a> IntoIterator for &'s Schedule<'a> {
    type Item = &'s ScheduledItem<'a>;
    type IntoIter = std::slice::Iter<'s, ScheduledItem<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for Schedule<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
