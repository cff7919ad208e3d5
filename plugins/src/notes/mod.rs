//! Note lookup variants and the document store they search.

pub mod embedding;
pub mod keyword;
pub mod store;
pub mod substring;
pub mod vector;

pub use embedding::{EmbeddingService, OllamaEmbeddingService, OpenAIEmbeddingService};
pub use keyword::KeywordNotes;
pub use store::DocumentStore;
pub use substring::SubstringNotes;
pub use vector::EmbeddingNotes;
