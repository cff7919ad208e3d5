//! Note lookup capability and the document chunks it searches.

mod document;
mod render;
pub mod r#trait;

use serde::{Deserialize, Serialize};

pub use document::{chunk_text, DocumentChunk, DEFAULT_CHUNK_SIZE};
pub use r#trait::NoteLookup;
pub use render::{render_hits, truncate_chars, NO_NOTES_CONFIGURED, NO_RELEVANT_NOTES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteHit {
    pub source: String,
    pub text: String,
    /// Backend specific: a distance for vector search, absent for text matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl NoteHit {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}
