//! Log line wording for executed items.

use crate::task::Task;

/// Line prefixes, emoji by default or ASCII tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub skip: &'static str,
    pub start: &'static str,
    pub tool: &'static str,
    pub notes: &'static str,
    pub done: &'static str,
}

impl Markers {
    pub const EMOJI: Markers = Markers {
        skip: "⏭",
        start: "▶",
        tool: "🔧",
        notes: "📖",
        done: "✅",
    };

    pub const ASCII: Markers = Markers {
        skip: "[skip]",
        start: "[start]",
        tool: "[tool]",
        notes: "[notes]",
        done: "[done]",
    };

    pub fn new(ascii: bool) -> Self {
        if ascii {
            Self::ASCII
        } else {
            Self::EMOJI
        }
    }

    pub fn skipping(&self, task: &Task) -> String {
        format!("{} Skipping backlog task: {}", self.skip, task.name)
    }

    pub fn starting(&self, task: &Task) -> String {
        format!(
            "{} Starting: {} ({} min)",
            self.start, task.name, task.duration_minutes
        )
    }

    pub fn tool_result(&self, tool: &str, first: &str) -> String {
        format!("{} Tool {} result: {}", self.tool, tool, first)
    }

    pub fn notes(&self, rendered: &str) -> String {
        format!("{} Notes:\n{}", self.notes, rendered)
    }

    pub fn finished(&self, task: &Task) -> String {
        format!("{} Finished: {}", self.done, task.name)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::EMOJI
    }
}

pub fn tool_error(error: &dyn std::fmt::Display) -> String {
    format!("Tool error: {error}")
}

pub fn working(tick: u32, ticks: u32) -> String {
    format!("   working... ({tick}/{ticks})")
}
