use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: usize = 800;

/// A slice of an ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// `"{source}_{index}"`
    pub id: String,
    pub source: String,
    pub text: String,
}

impl DocumentChunk {
    pub fn new(source: &str, index: usize, text: String) -> Self {
        Self {
            id: format!("{source}_{index}"),
            source: source.to_string(),
            text,
        }
    }
}

/// Split `text` into consecutive pieces of at most `size` characters.
///
/// Splits on `char` boundaries, never inside a code point. A `size` of zero
/// is treated as one.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let size = size.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
