use chrono::Local;
use dayplan_core::api::{LogLine, LogSink};
use serde_json::{json, Value};

/// One `task.log` JSON event per line on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonlSink;

impl JsonlSink {
    pub fn new() -> Self {
        Self
    }

    fn line_to_json(&self, line: &LogLine<'_>) -> Value {
        json!({
            "v": 1,
            "event_type": "task.log",
            "ts": Local::now().to_rfc3339(),
            "run_id": line.run_id,
            "task_id": line.task_id,
            "message": line.message,
        })
    }
}

impl LogSink for JsonlSink {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn emit(&self, line: &LogLine<'_>) {
        println!("{}", self.line_to_json(line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_carries_ids_and_message() {
        let value = JsonlSink::new().line_to_json(&LogLine {
            run_id: "run-1",
            task_id: "task-1",
            message: "📖 Notes:\nNo relevant notes found.",
        });
        assert_eq!(value["v"], 1);
        assert_eq!(value["event_type"], "task.log");
        assert_eq!(value["run_id"], "run-1");
        assert_eq!(value["task_id"], "task-1");
        assert_eq!(value["message"], "📖 Notes:\nNo relevant notes found.");
        assert!(value["ts"].as_str().is_some());
    }

    #[test]
    fn multi_line_message_stays_on_one_line() {
        let value = JsonlSink.line_to_json(&LogLine {
            run_id: "r",
            task_id: "t",
            message: "a\nb",
        });
        assert!(!value.to_string().contains('\n'));
    }
}
