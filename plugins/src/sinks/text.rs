use dayplan_core::api::{LogLine, LogSink};

/// Plain log lines on stdout, one `println!` per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSink;

impl LogSink for TextSink {
    fn name(&self) -> &str {
        "text"
    }

    fn emit(&self, line: &LogLine<'_>) {
        println!("{}", line.message);
    }
}
