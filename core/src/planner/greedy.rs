use std::cmp::Ordering;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::task::Task;

use super::schedule::{Schedule, ScheduledItem, TimeSlot};

/// Plan one day with greedy first-fit in priority order.
///
/// Tasks are ordered by importance (high first), then deadline (early first,
/// undated last), keeping input order on ties. Each task is placed back to
/// back from `day_start` if it fits the remaining budget; otherwise it goes
/// to the backlog without consuming time, so later shorter tasks can still
/// be packed.
pub fn plan(tasks: &[Task], available_minutes: u32, day_start: NaiveDateTime) -> Schedule<'_> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by(|a, b| priority(a, b));

    let mut remaining = available_minutes;
    let mut cursor = day_start;
    let mut items = Vec::with_capacity(ordered.len());

    for task in ordered {
        if task.duration_minutes <= remaining {
            let end = cursor + Duration::minutes(i64::from(task.duration_minutes));
            tracing::debug!(
                task = %task.name,
                start = %cursor.format("%H:%M"),
                end = %end.format("%H:%M"),
                "placed"
            );
            items.push(ScheduledItem::scheduled(task, TimeSlot { start: cursor, end }));
            cursor = end;
            remaining -= task.duration_minutes;
        } else {
            tracing::debug!(
                task = %task.name,
                duration = task.duration_minutes,
                remaining,
                "backlogged"
            );
            items.push(ScheduledItem::backlog(task));
        }
    }

    let schedule = Schedule::from_items(items);
    tracing::info!(
        tasks = schedule.len(),
        backlog = schedule.backlog().count(),
        minutes_used = schedule.total_minutes(),
        available_minutes,
        "schedule planned"
    );
    schedule
}

fn priority(a: &Task, b: &Task) -> Ordering {
    b.importance
        .cmp(&a.importance)
        .then_with(|| deadline_key(a).cmp(&deadline_key(b)))
}

fn deadline_key(task: &Task) -> NaiveDate {
    task.deadline.unwrap_or(NaiveDate::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_available_hours")]
    pub available_hours: u32,

    /// Local time the first task starts, `"HH:MM"`.
    #[serde(default = "default_start_time", with = "hh_mm")]
    pub start_time: NaiveTime,
}

fn default_available_hours() -> u32 {
    8
}

fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            available_hours: default_available_hours(),
            start_time: default_start_time(),
        }
    }
}

impl PlannerConfig {
    pub fn available_minutes(&self) -> u32 {
        self.available_hours.saturating_mul(60)
    }
}

/// Planner bound to a configuration; holds no other state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan for a given calendar date. Deterministic.
    pub fn plan_on<'a>(&self, tasks: &'a [Task], date: NaiveDate) -> Schedule<'a> {
        plan(
            tasks,
            self.config.available_minutes(),
            date.and_time(self.config.start_time),
        )
    }

    pub fn plan_today<'a>(&self, tasks: &'a [Task]) -> Schedule<'a> {
        self.plan_on(tasks, Local::now().date_naive())
    }
}

pub(crate) mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, duration: u32, importance: u8, deadline: Option<&str>) -> Task {
        Task::new(
            name,
            duration,
            importance,
            deadline.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
        )
        .unwrap()
    }

    fn nine_am() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 17)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn names<'a>(schedule: &'a Schedule<'_>) -> Vec<&'a str> {
        schedule.iter().map(|i| i.task.name.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_empty_schedule() {
        let schedule = plan(&[], 480, nine_am());
        assert!(schedule.is_empty());
    }

    #[test]
    fn sample_day_is_packed_back_to_back() {
        let tasks = vec![
            task("Math Homework", 60, 5, Some("2025-09-20")),
            task("Read Notes", 30, 3, None),
            task("Lab Report", 90, 4, Some("2025-09-18")),
        ];
        let schedule = plan(&tasks, 480, nine_am());

        assert_eq!(names(&schedule), ["Math Homework", "Lab Report", "Read Notes"]);
        let times: Vec<String> = schedule
            .iter()
            .map(|i| {
                let slot = i.slot.unwrap();
                format!("{}-{}", slot.start.format("%H:%M"), slot.end.format("%H:%M"))
            })
            .collect();
        assert_eq!(times, ["09:00-10:00", "10:00-11:30", "11:30-12:00"]);
    }

    #[test]
    fn undated_sorts_after_late_deadline() {
        let tasks = vec![
            task("undated", 10, 3, None),
            task("late", 10, 3, Some("2030-01-01")),
        ];
        let schedule = plan(&tasks, 480, nine_am());
        assert_eq!(names(&schedule), ["late", "undated"]);
    }

    #[test]
    fn skipped_task_does_not_block_shorter_ones() {
        let tasks = vec![
            task("a", 50, 5, None),
            task("too-big", 40, 4, None),
            task("fits", 10, 3, None),
        ];
        let schedule = plan(&tasks, 60, nine_am());
        let backlog: Vec<_> = schedule.backlog().map(|i| i.task.name.as_str()).collect();
        assert_eq!(backlog, ["too-big"]);
        let fits = schedule.iter().find(|i| i.task.name == "fits").unwrap();
        assert_eq!(fits.start().unwrap().format("%H:%M").to_string(), "09:50");
    }

    #[test]
    fn planner_config_parses_start_time() {
        let cfg: PlannerConfig =
            toml::from_str("available_hours = 6\nstart_time = \"08:30\"").unwrap();
        assert_eq!(cfg.available_minutes(), 360);
        assert_eq!(cfg.start_time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn plan_on_uses_configured_start() {
        let tasks = vec![task("only", 15, 1, None)];
        let planner = Planner::new(PlannerConfig {
            available_hours: 1,
            start_time: NaiveTime::from_hms_opt(13, 15, 0).unwrap(),
        });
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let schedule = planner.plan_on(&tasks, date);
        assert_eq!(
            schedule.items()[0].start(),
            Some(date.and_hms_opt(13, 15, 0).unwrap())
        );
    }
}
