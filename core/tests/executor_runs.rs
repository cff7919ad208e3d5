mod common;

use std::collections::HashSet;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use common::{
    counting_notes, day_start, fast_config, init_tracing, task, BrokenSearch, CannedSearch,
    EmptySearch, FailingNotes, FixedNotes,
};
use dayplan_core::api::{
    plan, ExecutionMode, ExecutionStatus, Executor, ExecutorConfig, MemorySink, ToolRegistry,
};

fn math_homework_lines() -> Vec<&'static str> {
    vec![
        "▶ Starting: Math Homework (60 min)",
        "🔧 Tool web_search result: top hit for Math Homework",
        "📖 Notes:\nSource: ml.md\nGradient descent minimises loss.",
        "   working... (1/3)",
        "   working... (2/3)",
        "   working... (3/3)",
        "✅ Finished: Math Homework",
    ]
}

fn wired(config: ExecutorConfig) -> Executor {
    Executor::new(config)
        .with_notes(Arc::new(FixedNotes))
        .with_tools(Arc::new(ToolRegistry::new().with(Arc::new(CannedSearch))))
}

#[tokio::test]
async fn sequential_run_emits_exact_lines_in_schedule_order() {
    init_tracing();
    let tasks = vec![
        task("Math Homework", 60, 5, None),
        task("Read Notes", 30, 3, None),
    ];
    let schedule = plan(&tasks, 60, day_start());
    let sink = MemorySink::new();

    let report = wired(fast_config())
        .run_sequential(schedule.items(), &sink)
        .await
        .unwrap();

    let mut expected = math_homework_lines();
    expected.push("⏭ Skipping backlog task: Read Notes");
    assert_eq!(sink.messages(), expected);

    assert_eq!(report.mode, ExecutionMode::Sequential);
    assert_eq!((report.done, report.backlog), (1, 1));
    assert_eq!(report.status_of(&tasks[1].id), Some(ExecutionStatus::Backlog));
}

#[tokio::test]
async fn parallel_run_returns_one_result_per_item_for_every_pool_size() {
    let tasks: Vec<_> = (0..6)
        .map(|i| task(&format!("task-{i}"), 20 + i * 10, 3, None))
        .collect();
    let schedule = plan(&tasks, 150, day_start());
    assert!(schedule.backlog().count() > 0);

    for max_workers in 1..=tasks.len() + 1 {
        let sink = MemorySink::new();
        let report = wired(fast_config())
            .run_parallel(schedule.items(), &sink, max_workers)
            .await
            .unwrap();

        assert_eq!(report.total(), schedule.len(), "max_workers={max_workers}");
        let ids: HashSet<_> = report.results.iter().map(|r| r.task_id.as_str()).collect();
        assert_eq!(ids.len(), schedule.len());
        assert_eq!(report.backlog, schedule.backlog().count());
        for item in schedule.iter() {
            let expected = if item.is_backlog() {
                ExecutionStatus::Backlog
            } else {
                ExecutionStatus::Done
            };
            assert_eq!(report.status_of(&item.task.id), Some(expected));
        }
    }
}

#[tokio::test]
async fn parallel_run_keeps_each_items_lines_in_order() {
    let tasks = vec![
        task("Math Homework", 60, 5, None),
        task("Lab Report", 90, 4, None),
        task("Read Notes", 30, 3, None),
    ];
    let schedule = plan(&tasks, 480, day_start());
    let sink = MemorySink::new();

    wired(fast_config())
        .run_parallel(schedule.items(), &sink, 3)
        .await
        .unwrap();

    assert_eq!(sink.messages_for(&tasks[0].id), math_homework_lines());
    let lab = sink.messages_for(&tasks[1].id);
    assert_eq!(lab.first().map(String::as_str), Some("▶ Starting: Lab Report (90 min)"));
    assert_eq!(lab.last().map(String::as_str), Some("✅ Finished: Lab Report"));
    assert_eq!(sink.lines().len(), 7 + 8 + 5);
}

#[tokio::test]
async fn pool_never_exceeds_max_workers() {
    let tasks: Vec<_> = (0..8).map(|i| task(&format!("t{i}"), 10, 3, None)).collect();
    let schedule = plan(&tasks, 480, day_start());

    let notes = counting_notes();
    let executor = Executor::new(fast_config()).with_notes(notes.clone());
    executor
        .run(schedule.items(), &MemorySink::new(), ExecutionMode::Parallel { max_workers: 3 })
        .await
        .unwrap();

    assert_eq!(notes.calls(), 8);
    assert_eq!(notes.peak(), 3);
}

#[tokio::test]
async fn sequential_mode_has_one_item_in_flight() {
    let tasks: Vec<_> = (0..4).map(|i| task(&format!("t{i}"), 10, 3, None)).collect();
    let schedule = plan(&tasks, 480, day_start());

    let notes = counting_notes();
    Executor::new(fast_config())
        .with_notes(notes.clone())
        .run_sequential(schedule.items(), &MemorySink::new())
        .await
        .unwrap();

    assert_eq!(notes.peak(), 1);
}

#[tokio::test]
async fn tool_failures_are_logged_and_do_not_abort() {
    init_tracing();
    let tasks = vec![task("Read Notes", 30, 3, None)];
    let schedule = plan(&tasks, 480, day_start());

    let sink = MemorySink::new();
    let broken = Executor::new(fast_config())
        .with_tools(Arc::new(ToolRegistry::new().with(Arc::new(BrokenSearch))));
    let report = broken.run_sequential(schedule.items(), &sink).await.unwrap();
    assert_eq!(report.done, 1);
    assert_eq!(sink.messages()[1], "Tool error: tool web_search failed: rate limited");

    let sink = MemorySink::new();
    let unknown = Executor::new(ExecutorConfig {
        tool: Some("calculator".to_string()),
        ..fast_config()
    })
    .with_tools(Arc::new(ToolRegistry::new()));
    let report = unknown.run_sequential(schedule.items(), &sink).await.unwrap();
    assert_eq!(report.done, 1);
    assert_eq!(sink.messages()[1], "Tool error: Tool calculator not registered");

    let sink = MemorySink::new();
    let empty = Executor::new(fast_config())
        .with_tools(Arc::new(ToolRegistry::new().with(Arc::new(EmptySearch))));
    let report = empty.run_sequential(schedule.items(), &sink).await.unwrap();
    assert_eq!(report.done, 1);
    assert_eq!(sink.messages()[1], "Tool error: tool web_search returned no results");
}

#[tokio::test]
async fn missing_or_failing_notes_render_placeholders() {
    let tasks = vec![task("Read Notes", 30, 3, None)];
    let schedule = plan(&tasks, 480, day_start());

    let sink = MemorySink::new();
    Executor::new(fast_config())
        .run_sequential(schedule.items(), &sink)
        .await
        .unwrap();
    assert_eq!(sink.messages()[1], "📖 Notes:\n(No notes configured)");

    let sink = MemorySink::new();
    Executor::new(fast_config())
        .with_notes(Arc::new(FailingNotes))
        .run_sequential(schedule.items(), &sink)
        .await
        .unwrap();
    assert_eq!(sink.messages()[1], "📖 Notes:\nNo relevant notes found.");
}

#[tokio::test]
async fn empty_schedule_completes_immediately() {
    let schedule = plan(&[], 480, day_start());
    let report = Executor::new(fast_config())
        .run(schedule.items(), &MemorySink::new(), ExecutionMode::Parallel { max_workers: 2 })
        .await;
    let report = tokio_test::assert_ok!(report);
    assert_eq!(report.total(), 0);
}

#[tokio::test(start_paused = true)]
async fn pacing_sleeps_per_tick() {
    let tasks = vec![task("Lab Report", 90, 4, None)];
    let schedule = plan(&tasks, 480, day_start());
    let started = tokio::time::Instant::now();

    Executor::new(ExecutorConfig::default())
        .run_sequential(schedule.items(), &MemorySink::new())
        .await
        .unwrap();

    // 90 min / 20 min per tick = 4 ticks of 200 ms (virtual time)
    assert!(started.elapsed() >= std::time::Duration::from_millis(800));
}
