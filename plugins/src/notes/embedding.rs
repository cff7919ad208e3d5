//! Embedding services for text vectorization.
//!
//! Supports both local (Ollama) and remote (OpenAI-compatible) providers.

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Trait for embedding text into vectors.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generate embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;
}

/// Ollama local embedding service.
pub struct OllamaEmbeddingService {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimension: usize,
}

impl OllamaEmbeddingService {
    pub fn new(base_url: String, model: String, dimension: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dimension,
        }
    }

    /// Create with default Ollama configuration.
    pub fn default_config() -> Self {
        Self::new(
            "http://localhost:11434".to_string(),
            "nomic-embed-text".to_string(),
            768,
        )
    }
}

#[async_trait]
impl EmbeddingService for OllamaEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = OllamaEmbedRequest {
            model: &self.model,
            prompt: text,
        };

        let url = format!("{}/api/embeddings", self.base_url);
        tracing::debug!(url = %url, model = %self.model, text_len = text.len(), "ollama embedding request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to send embedding request to Ollama at {}. Is Ollama running?",
                    self.base_url
                )
            })?;

        let status = response.status();
        let result: OllamaEmbedResponse = response
            .error_for_status()
            .with_context(|| format!("Ollama returned error status: {}", status))?
            .json()
            .await
            .context("Failed to parse Ollama embedding response")?;

        Ok(result.embedding)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        use futures::future::try_join_all;

        // Limit concurrency to avoid overwhelming the local server
        let concurrent_limit = 8usize;
        let mut all_results = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(concurrent_limit) {
            let results = try_join_all(chunk.iter().map(|text| self.embed(text))).await?;
            all_results.extend(results);
        }

        Ok(all_results)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[derive(serde::Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(serde::Deserialize)]
struct OllamaEmbedResponse {
    embedding: Vec<f32>,
}

/// OpenAI-compatible remote embedding service.
pub struct OpenAIEmbeddingService {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    dimension: usize,
}

impl OpenAIEmbeddingService {
    pub fn new(base_url: String, api_key: String, model: String, dimension: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            dimension,
        }
    }

    /// Create with default OpenAI configuration.
    pub fn default_config(api_key: String) -> Self {
        Self::new(
            "https://api.openai.com/v1".to_string(),
            api_key,
            "text-embedding-3-small".to_string(),
            1536,
        )
    }

    async fn request(&self, input: serde_json::Value) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.base_url);
        tracing::debug!(url = %url, model = %self.model, "openai embedding request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "input": input,
                "encoding_format": "float",
            }))
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to send embedding request to OpenAI at {}",
                    self.base_url
                )
            })?;

        let status = response.status();
        let result: OpenAIEmbedResponse = response
            .error_for_status()
            .with_context(|| format!("OpenAI returned error status: {}", status))?
            .json()
            .await
            .context("Failed to parse OpenAI embedding response")?;

        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.request(serde_json::json!(text))
            .await?
            .into_iter()
            .next()
            .context("OpenAI returned no embedding")
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = self.request(serde_json::json!(texts)).await?;
        anyhow::ensure!(
            vectors.len() == texts.len(),
            "OpenAI returned {} embeddings for {} inputs",
            vectors.len(),
            texts.len()
        );
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[derive(serde::Deserialize)]
struct OpenAIEmbedResponse {
    data: Vec<OpenAIEmbedData>,
}

#[derive(serde::Deserialize)]
struct OpenAIEmbedData {
    embedding: Vec<f32>,
}
