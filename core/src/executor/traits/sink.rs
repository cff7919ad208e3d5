use std::sync::Mutex;

/// One log line produced while executing a scheduled item.
#[derive(Debug, Clone, Copy)]
pub struct LogLine<'a> {
    pub run_id: &'a str,
    pub task_id: &'a str,
    pub message: &'a str,
}

/// Destination for executor log lines (controls output format).
///
/// `emit` may be called from several in-flight items at once; each call must
/// write its line atomically.
pub trait LogSink: Send + Sync {
    fn name(&self) -> &str;
    fn emit(&self, line: &LogLine<'_>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub task_id: String,
    pub message: String,
}

/// Sink that keeps every line in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<CapturedLine>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|l| l.message).collect()
    }

    /// Lines emitted for one task, in order.
    pub fn messages_for(&self, task_id: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.task_id == task_id)
            .map(|l| l.message)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn emit(&self, line: &LogLine<'_>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(CapturedLine {
                task_id: line.task_id.to_string(),
                message: line.message.to_string(),
            });
        }
    }
}
