//! Greedy day planner.
//!
//! ```text
//! &[Task]
//!   ↓  stable sort: importance desc, deadline asc (undated last)
//! first-fit walk over remaining minutes
//!   ↓
//! Schedule<'_> { ScheduledItem { task: &Task, slot: Option<TimeSlot> } }
//! ```

mod greedy;
mod schedule;

pub use greedy::{plan, Planner, PlannerConfig};
pub use schedule::{Schedule, ScheduledItem, TimeSlot};
