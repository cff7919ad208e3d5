use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Visual progress for a run: one overall bar plus a spinner per in-flight task.
///
/// Methods take `&self` so concurrent items can report through a shared
/// reference.
pub struct ProgressMonitor {
    multi: MultiProgress,
    overall: ProgressBar,
    task_bars: Mutex<HashMap<String, ProgressBar>>,
    enabled: bool,
}

impl ProgressMonitor {
    /// Create a new progress monitor
    ///
    /// # Arguments
    ///
    /// * `total_items` - Number of schedule items in the run
    /// * `enabled` - Whether to draw anything (off for jsonl output and tests)
    pub fn new(total_items: usize, enabled: bool) -> Self {
        if !enabled {
            return Self::hidden();
        }

        let multi = MultiProgress::new();
        let overall = multi.add(ProgressBar::new(total_items as u64));

        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tasks ({percent}%) {msg}")
        {
            overall.set_style(style.progress_chars("█▓▒░  "));
        }
        overall.set_message("Starting...");

        Self {
            multi,
            overall,
            task_bars: Mutex::new(HashMap::new()),
            enabled: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::new(),
            overall: ProgressBar::hidden(),
            task_bars: Mutex::new(HashMap::new()),
            enabled: false,
        }
    }

    /// Show a spinner for a task that just started.
    pub fn start_task(&self, task_id: &str, name: &str) {
        if !self.enabled {
            return;
        }

        let bar = self.multi.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.green} {msg}") {
            bar.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        bar.set_message(format!("⏳ {name}"));
        bar.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bars) = self.task_bars.lock() {
            bars.insert(task_id.to_string(), bar);
        }
    }

    /// Mark an item as handled. Backlog items have no spinner and only advance the bar.
    pub fn complete_task(&self, task_id: &str, message: &str) {
        if !self.enabled {
            return;
        }

        let bar = self.task_bars.lock().ok().and_then(|mut b| b.remove(task_id));
        if let Some(bar) = bar {
            bar.finish_with_message(message.to_string());
        }

        self.overall.inc(1);
    }

    pub fn finish(&self) {
        if self.enabled {
            self.overall.finish_with_message("All tasks handled");
        }
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        if let Ok(mut bars) = self.task_bars.lock() {
            for (_, bar) in bars.drain() {
                bar.finish_and_clear();
            }
        }
    }
}
