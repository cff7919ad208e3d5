use async_trait::async_trait;
use dayplan_core::api::{NoteHit, NoteLookup};

use super::store::DocumentStore;

/// Case-insensitive substring match over chunk text and source name.
/// Returns the first `limit` matches in ingestion order.
pub struct SubstringNotes {
    store: DocumentStore,
}

impl SubstringNotes {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }
}

#[async_trait]
impl NoteLookup for SubstringNotes {
    fn name(&self) -> &str {
        "substring"
    }

    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<NoteHit>> {
        let query = query.to_lowercase();
        Ok(self
            .store
            .chunks()
            .iter()
            .filter(|c| {
                c.text.to_lowercase().contains(&query) || c.source.to_lowercase().contains(&query)
            })
            .take(limit)
            .map(|c| NoteHit::new(c.source.clone(), c.text.clone()))
            .collect())
    }
}
