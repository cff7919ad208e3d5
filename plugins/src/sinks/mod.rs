pub mod jsonl;
pub mod text;

pub use jsonl::JsonlSink;
pub use text::TextSink;
