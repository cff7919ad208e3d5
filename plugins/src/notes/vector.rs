use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use dayplan_core::api::{DocumentChunk, NoteHit, NoteLookup};

use super::embedding::EmbeddingService;
use super::store::DocumentStore;

/// Nearest-neighbour lookup over embedded chunks (L2 distance, ascending).
///
/// Chunks are embedded once at construction; each search embeds the query.
pub struct EmbeddingNotes {
    chunks: Vec<DocumentChunk>,
    vectors: Vec<Vec<f32>>,
    service: Arc<dyn EmbeddingService>,
}

impl EmbeddingNotes {
    pub async fn build(
        store: DocumentStore,
        service: Arc<dyn EmbeddingService>,
    ) -> anyhow::Result<Self> {
        let chunks = store.chunks().to_vec();
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = if texts.is_empty() {
            Vec::new()
        } else {
            service
                .embed_batch(&texts)
                .await
                .context("failed to embed documents")?
        };
        anyhow::ensure!(
            vectors.len() == chunks.len(),
            "embedding service returned {} vectors for {} chunks",
            vectors.len(),
            chunks.len()
        );
        tracing::info!(chunks = chunks.len(), "document embeddings ready");

        Ok(Self {
            chunks,
            vectors,
            service,
        })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[async_trait]
impl NoteLookup for EmbeddingNotes {
    fn name(&self) -> &str {
        "embedding"
    }

    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<NoteHit>> {
        if self.chunks.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let query_vec = self.service.embed(query).await?;
        let mut scored: Vec<(usize, f32)> = Vec::with_capacity(self.vectors.len());
        for (idx, vector) in self.vectors.iter().enumerate() {
            anyhow::ensure!(
                vector.len() == query_vec.len(),
                "embedding dimension mismatch: chunk {} vs query {}",
                vector.len(),
                query_vec.len()
            );
            scored.push((idx, l2_distance(vector, &query_vec)));
        }
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(idx, distance)| {
                let chunk = &self.chunks[idx];
                NoteHit::new(chunk.source.clone(), chunk.text.clone()).with_score(distance)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Maps text to a 2-d vector by counting two marker words.
    #[derive(Default)]
    struct WordCountEmbedding {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingService for WordCountEmbedding {
        async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let text = text.to_lowercase();
            Ok(vec![
                text.matches("gradient").count() as f32,
                text.matches("packet").count() as f32,
            ])
        }

        async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
            let mut out = Vec::with_capacity(texts.len());
            for t in texts {
                out.push(self.embed(t).await?);
            }
            Ok(out)
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    fn store() -> DocumentStore {
        let mut store = DocumentStore::default();
        store.ingest_text("net.md", "packet routing and packet loss");
        store.ingest_text("ml.md", "gradient descent uses the gradient");
        store.ingest_text("mixed.md", "gradient of packet rates");
        store
    }

    #[tokio::test]
    async fn nearest_chunks_come_first() {
        let notes = EmbeddingNotes::build(store(), Arc::new(WordCountEmbedding::default()))
            .await
            .unwrap();

        let hits = notes.search("gradient gradient", 2).await.unwrap();
        let sources: Vec<_> = hits.iter().map(|h| h.source.as_str()).collect();
        assert_eq!(sources, ["ml.md", "mixed.md"]);
        assert_eq!(hits[0].score, Some(0.0));
        assert!(hits[1].score.unwrap() > 0.0);
    }

    #[tokio::test]
    async fn empty_store_never_calls_service() {
        let service = Arc::new(WordCountEmbedding::default());
        let notes = EmbeddingNotes::build(DocumentStore::default(), service.clone())
            .await
            .unwrap();
        assert!(notes.search("anything", 2).await.unwrap().is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }
}
