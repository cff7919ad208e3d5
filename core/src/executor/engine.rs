use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ExecutorError;
use crate::notes::{render_hits, NoteLookup, NO_NOTES_CONFIGURED, NO_RELEVANT_NOTES};
use crate::planner::ScheduledItem;
use crate::task::Task;
use crate::tools::{first_result, ToolRegistry};

use super::output::{self, Markers};
use super::progress::ProgressMonitor;
use super::scheduler::execute_parallel;
use super::traits::{LogLine, LogSink};
use super::types::{ExecutionMode, ExecutionResult, ExecutorConfig, RunReport};

/// Per-run state shared by every item of one `run` call.
struct RunContext<'r> {
    run_id: &'r str,
    sink: &'r dyn LogSink,
    progress: &'r ProgressMonitor,
}

impl RunContext<'_> {
    fn emit(&self, task_id: &str, message: &str) {
        self.sink.emit(&LogLine {
            run_id: self.run_id,
            task_id,
            message,
        });
    }
}

/// Runs a schedule: consults the tool and notes for each placed task and
/// simulates the work with paced progress lines.
///
/// Holds only shared read-only collaborators, so one executor can serve
/// concurrent items (and be cloned cheaply).
#[derive(Clone)]
pub struct Executor {
    config: ExecutorConfig,
    notes: Option<Arc<dyn NoteLookup>>,
    tools: Option<Arc<ToolRegistry>>,
    markers: Markers,
}

impl Executor {
    pub fn new(config: ExecutorConfig) -> Self {
        let markers = Markers::new(config.ascii);
        Self {
            config,
            notes: None,
            tools: None,
            markers,
        }
    }

    pub fn with_notes(mut self, notes: Arc<dyn NoteLookup>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn with_tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute a schedule in the given mode.
    ///
    /// Returns after every item has been processed, with exactly one result
    /// per item. Tool and note failures are logged and never abort the run.
    pub async fn run(
        &self,
        schedule: &[ScheduledItem<'_>],
        sink: &dyn LogSink,
        mode: ExecutionMode,
    ) -> Result<RunReport, ExecutorError> {
        let run_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let progress = ProgressMonitor::new(schedule.len(), self.config.progress_bar);
        let ctx = RunContext {
            run_id: &run_id,
            sink,
            progress: &progress,
        };

        tracing::info!(
            run_id = %run_id,
            items = schedule.len(),
            mode = %mode,
            sink = sink.name(),
            "run started"
        );

        let results = match mode {
            ExecutionMode::Sequential => {
                let mut results = Vec::with_capacity(schedule.len());
                for item in schedule {
                    results.push(self.process(item, &ctx).await);
                }
                results
            }
            ExecutionMode::Parallel { max_workers } => {
                execute_parallel(schedule, max_workers, |item| self.process(item, &ctx)).await?
            }
        };

        if results.len() != schedule.len() {
            return Err(ExecutorError::IncompleteRun {
                expected: schedule.len(),
                actual: results.len(),
            });
        }

        progress.finish();
        let report = RunReport::new(
            run_id,
            mode,
            results,
            start.elapsed().as_millis() as u64,
        );
        tracing::info!(
            run_id = %report.run_id,
            done = report.done,
            backlog = report.backlog,
            duration_ms = report.duration_ms,
            "run finished"
        );
        Ok(report)
    }

    /// Process items one at a time, in schedule order.
    pub async fn run_sequential(
        &self,
        schedule: &[ScheduledItem<'_>],
        sink: &dyn LogSink,
    ) -> Result<RunReport, ExecutorError> {
        self.run(schedule, sink, ExecutionMode::Sequential).await
    }

    /// Process items on a bounded pool of at most `max_workers` in flight.
    pub async fn run_parallel(
        &self,
        schedule: &[ScheduledItem<'_>],
        sink: &dyn LogSink,
        max_workers: usize,
    ) -> Result<RunReport, ExecutorError> {
        self.run(schedule, sink, ExecutionMode::Parallel { max_workers })
            .await
    }

    /// Process a single item outside of a run.
    pub async fn execute_item(
        &self,
        item: &ScheduledItem<'_>,
        sink: &dyn LogSink,
    ) -> ExecutionResult {
        let run_id = Uuid::new_v4().to_string();
        let progress = ProgressMonitor::hidden();
        let ctx = RunContext {
            run_id: &run_id,
            sink,
            progress: &progress,
        };
        self.process(item, &ctx).await
    }

    async fn process(&self, item: &ScheduledItem<'_>, ctx: &RunContext<'_>) -> ExecutionResult {
        let task = item.task;
        let span = tracing::info_span!("task", id = %task.id, name = %task.name);

        async move {
            if item.is_backlog() {
                ctx.emit(&task.id, &self.markers.skipping(task));
                ctx.progress.complete_task(&task.id, "backlog");
                tracing::debug!("skipped backlog item");
                return ExecutionResult::backlog(task.id.clone());
            }

            ctx.progress.start_task(&task.id, &task.name);
            ctx.emit(&task.id, &self.markers.starting(task));

            self.consult_tool(task, ctx).await;

            let notes = self.lookup_notes(&task.name).await;
            ctx.emit(&task.id, &self.markers.notes(&notes));

            self.simulate_work(task, ctx).await;

            let finished = self.markers.finished(task);
            ctx.emit(&task.id, &finished);
            ctx.progress.complete_task(&task.id, &finished);
            tracing::debug!("item finished");
            ExecutionResult::done(task.id.clone())
        }
        .instrument(span)
        .await
    }

    async fn consult_tool(&self, task: &Task, ctx: &RunContext<'_>) {
        let (Some(tools), Some(tool)) = (self.tools.as_ref(), self.config.tool.as_deref()) else {
            return;
        };

        let headline = tools
            .call(tool, json!({ "query": task.name }))
            .await
            .and_then(|output| first_result(tool, &output));
        match headline {
            Ok(first) => {
                ctx.emit(&task.id, &self.markers.tool_result(tool, &first));
            }
            Err(e) => {
                tracing::warn!(tool, error = %e, "tool call failed");
                ctx.emit(&task.id, &output::tool_error(&e));
            }
        }
    }

    async fn lookup_notes(&self, query: &str) -> String {
        let Some(notes) = self.notes.as_ref() else {
            return NO_NOTES_CONFIGURED.to_string();
        };

        match notes.search(query, self.config.notes_limit).await {
            Ok(hits) => render_hits(&hits, self.config.snippet_chars),
            Err(e) => {
                tracing::warn!(lookup = notes.name(), error = %e, "note lookup failed");
                NO_RELEVANT_NOTES.to_string()
            }
        }
    }

    async fn simulate_work(&self, task: &Task, ctx: &RunContext<'_>) {
        let pacing = self.config.pacing;
        let ticks = pacing.ticks_for(task.duration_minutes);

        for tick in 1..=ticks {
            ctx.emit(&task.id, &output::working(tick, ticks));
            if pacing.tick_ms > 0 {
                tokio::time::sleep(Duration::from_millis(pacing.tick_ms)).await;
            } else {
                tokio::task::yield_now().await;
            }
        }
    }
}
