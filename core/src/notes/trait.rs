use async_trait::async_trait;

use super::NoteHit;

/// Capability mapping a text query to related reference text.
///
/// Implementations make no ranking or latency promises. An empty result is
/// the normal "nothing relevant" outcome; `Err` is reserved for a backend
/// that could not be reached, and callers treat it the same as no hits.
#[async_trait]
pub trait NoteLookup: Send + Sync {
    fn name(&self) -> &str;
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<NoteHit>>;
}
