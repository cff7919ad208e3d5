//! `dayplan run`: plan the day, then execute the schedule.
use chrono::Local;
use dayplan_core::api::{self as core_api, AppConfig, CliError, PacingConfig, RunReport};
use dayplan_plugins::factory;
use serde_json::json;

use crate::commands::cli::{NotesSourceArgs, RunArgs, StreamFormat};
use crate::commands::plan::{load_tasks, planning_overrides};

pub async fn handle_run(args: RunArgs, ctx: &core_api::AppContext) -> Result<i32, CliError> {
    let tasks = load_tasks(&args.planning, ctx)?;
    let (planner_cfg, date) = planning_overrides(&args.planning, ctx.cfg().planner)?;

    let mut cfg = ctx.cfg().clone();
    cfg.planner = planner_cfg;
    apply_run_overrides(&mut cfg, &args);
    let ctx = ctx.with_config(cfg);

    let schedule = ctx.planner().plan_on(&tasks, date);
    let executor = ctx.executor().await?;
    let sink = factory::build_sink(args.stream_format.as_str());
    let mode = ctx.cfg().executor.execution_mode();

    let report = executor.run(schedule.items(), &*sink, mode).await?;

    match args.stream_format {
        StreamFormat::Jsonl => println!("{}", run_end_event(&report)),
        StreamFormat::Text => println!("{}", summary_line(&report)),
    }
    Ok(0)
}

pub fn apply_notes_overrides(cfg: &mut AppConfig, notes: &NotesSourceArgs) {
    if let Some(strategy) = notes.notes {
        cfg.notes.strategy = strategy.into();
    }
    if !notes.docs.is_empty() {
        cfg.notes.docs = notes.docs.iter().map(|d| core_api::expand_path(d)).collect();
    }
}

/// CLI flags override config.
pub fn apply_run_overrides(cfg: &mut AppConfig, args: &RunArgs) {
    apply_notes_overrides(cfg, &args.notes);
    if let Some(mode) = args.mode {
        cfg.executor.mode = mode.into();
    }
    if let Some(n) = args.max_workers {
        cfg.executor.max_workers = n;
    }
    if args.no_tools {
        cfg.executor.tool = None;
    }
    if args.fast {
        cfg.executor.pacing = PacingConfig::instant();
    }
    if args.ascii {
        cfg.executor.ascii = true;
    }
    // Bars would interleave with JSON lines on stdout
    cfg.executor.progress_bar = args.progress && args.stream_format == StreamFormat::Text;
}

pub fn summary_line(report: &RunReport) -> String {
    format!(
        "Run {}: {} done, {} backlog in {} ms ({})",
        report.run_id, report.done, report.backlog, report.duration_ms, report.mode
    )
}

pub fn run_end_event(report: &RunReport) -> serde_json::Value {
    json!({
        "v": 1,
        "event_type": "run.end",
        "ts": Local::now().to_rfc3339(),
        "run_id": report.run_id,
        "metadata": {
            "mode": report.mode,
            "done": report.done,
            "backlog": report.backlog,
            "duration_ms": report.duration_ms,
            "results": report.results,
        }
    })
}
