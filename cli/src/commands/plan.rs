//! `dayplan plan`: resolve tasks, plan the day, print it.
use chrono::{Local, NaiveDate, NaiveTime};
use dayplan_core::api::{
    self as core_api, load_task_file, CliError, PlannerConfig, Schedule, ScheduledItem, Task,
    TaskBook,
};

use crate::commands::cli::{OutputFormat, PlanArgs, PlanningArgs};
use crate::commands::tasks::book_path;

pub fn handle_plan(args: PlanArgs, ctx: &core_api::AppContext) -> Result<(), CliError> {
    let tasks = load_tasks(&args.planning, ctx)?;
    let (planner_cfg, date) = planning_overrides(&args.planning, ctx.cfg().planner)?;
    let schedule = core_api::Planner::new(planner_cfg).plan_on(&tasks, date);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&schedule)
                .map_err(|e| CliError::Command(e.to_string()))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for line in format_schedule(&schedule) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Tasks from `--tasks FILE`, else from the task book.
pub fn load_tasks(args: &PlanningArgs, ctx: &core_api::AppContext) -> Result<Vec<Task>, CliError> {
    let tasks = match &args.tasks {
        Some(path) => load_task_file(path)?,
        None => {
            let book = TaskBook::open(book_path(args.book.as_deref(), ctx))?;
            book.tasks().to_vec()
        }
    };
    tracing::debug!(count = tasks.len(), "tasks loaded");
    Ok(tasks)
}

/// Apply `--hours/--start/--date` on top of the configured planner.
pub fn planning_overrides(
    args: &PlanningArgs,
    mut cfg: PlannerConfig,
) -> Result<(PlannerConfig, NaiveDate), CliError> {
    if let Some(hours) = args.hours {
        cfg.available_hours = hours;
    }
    if let Some(start) = &args.start {
        cfg.start_time = NaiveTime::parse_from_str(start.trim(), "%H:%M")
            .map_err(|e| CliError::Config(format!("invalid --start {start:?}: {e}")))?;
    }
    let date = match &args.date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), core_api::DEADLINE_FORMAT)
            .map_err(|e| CliError::Config(format!("invalid --date {raw:?}: {e}")))?,
        None => Local::now().date_naive(),
    };
    Ok((cfg, date))
}

pub fn format_item(item: &ScheduledItem<'_>) -> String {
    match item.slot {
        Some(slot) => format!(
            "{} - {}: {} (imp {})",
            slot.start.format("%H:%M"),
            slot.end.format("%H:%M"),
            item.task.name,
            item.task.importance
        ),
        None => format!("BACKLOG: {} (imp {})", item.task.name, item.task.importance),
    }
}

pub fn format_schedule(schedule: &Schedule<'_>) -> Vec<String> {
    schedule.iter().map(format_item).collect()
}
