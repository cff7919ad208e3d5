#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

use dayplan_core::api::{ExecutorConfig, NoteHit, NoteLookup, PacingConfig, Task, Tool};

pub fn task(name: &str, duration: u32, importance: u8, deadline: Option<&str>) -> Task {
    Task::new(
        name,
        duration,
        importance,
        deadline.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
    )
    .unwrap()
}

pub fn day_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 17)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub fn sample_tasks() -> Vec<Task> {
    vec![
        task("Math Homework", 60, 5, Some("2025-09-20")),
        task("Read Notes", 30, 3, None),
        task("Lab Report", 90, 4, Some("2025-09-18")),
    ]
}

/// Deterministic pseudo-random task set (LCG), no external generator needed.
pub fn generated_tasks(seed: u64, count: usize) -> Vec<Task> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move |bound: u64| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % bound
    };

    (0..count)
        .map(|i| {
            let duration = 5 + next(120) as u32;
            let importance = 1 + next(5) as u8;
            let deadline = match next(3) {
                0 => None,
                _ => Some(format!("2025-09-{:02}", 17 + next(10))),
            };
            task(&format!("task-{i}"), duration, importance, deadline.as_deref())
        })
        .collect()
}

pub fn fast_config() -> ExecutorConfig {
    ExecutorConfig {
        pacing: PacingConfig::instant(),
        ..ExecutorConfig::default()
    }
}

/// Returns one fixed hit for every query.
pub struct FixedNotes;

#[async_trait]
impl NoteLookup for FixedNotes {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn search(&self, _query: &str, _limit: usize) -> anyhow::Result<Vec<NoteHit>> {
        Ok(vec![NoteHit::new("ml.md", "Gradient descent minimises loss.")])
    }
}

pub struct FailingNotes;

#[async_trait]
impl NoteLookup for FailingNotes {
    fn name(&self) -> &str {
        "failing"
    }

    async fn search(&self, _query: &str, _limit: usize) -> anyhow::Result<Vec<NoteHit>> {
        anyhow::bail!("index unavailable")
    }
}

/// Sleeps inside `search` and records the peak number of concurrent calls.
#[derive(Default)]
pub struct CountingNotes {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl CountingNotes {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NoteLookup for CountingNotes {
    fn name(&self) -> &str {
        "counting"
    }

    async fn search(&self, _query: &str, _limit: usize) -> anyhow::Result<Vec<NoteHit>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

/// Stand-in for `web_search` with a predictable headline.
pub struct CannedSearch;

#[async_trait]
impl Tool for CannedSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    async fn call(&self, payload: Value) -> anyhow::Result<Value> {
        let query = payload["query"].as_str().unwrap_or_default();
        Ok(json!({ "results": [format!("top hit for {query}")] }))
    }
}

pub struct BrokenSearch;

#[async_trait]
impl Tool for BrokenSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    async fn call(&self, _payload: Value) -> anyhow::Result<Value> {
        anyhow::bail!("rate limited")
    }
}

pub struct EmptySearch;

#[async_trait]
impl Tool for EmptySearch {
    fn name(&self) -> &str {
        "web_search"
    }

    async fn call(&self, _payload: Value) -> anyhow::Result<Value> {
        Ok(json!({ "results": [] }))
    }
}

pub fn counting_notes() -> Arc<CountingNotes> {
    Arc::new(CountingNotes::default())
}

/// Route `tracing` output through the test harness; `RUST_LOG` narrows it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dayplan_core=debug")),
        )
        .with_test_writer()
        .try_init();
}
