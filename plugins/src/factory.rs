use std::sync::Arc;

use anyhow::Result;

use dayplan_core::api::{
    AppConfig, EmbeddingConfig, EmbeddingProvider, LogSink, NoteLookup, NotesConfig,
    NotesStrategy, ToolRegistry,
};

use crate::notes::{
    DocumentStore, EmbeddingNotes, EmbeddingService, KeywordNotes, OllamaEmbeddingService,
    OpenAIEmbeddingService, SubstringNotes,
};
use crate::sinks::{JsonlSink, TextSink};
use crate::tools::WebSearchTool;

pub async fn build_notes(cfg: &AppConfig) -> Result<Option<Arc<dyn NoteLookup>>> {
    build_notes_from(&cfg.notes).await
}

pub async fn build_notes_from(cfg: &NotesConfig) -> Result<Option<Arc<dyn NoteLookup>>> {
    let notes: Arc<dyn NoteLookup> = match cfg.strategy {
        NotesStrategy::None => return Ok(None),
        NotesStrategy::Keyword => match &cfg.keywords {
            Some(table) => Arc::new(KeywordNotes::from_map(table)),
            None => Arc::new(KeywordNotes::default()),
        },
        NotesStrategy::Substring => Arc::new(SubstringNotes::new(build_store(cfg)?)),
        NotesStrategy::Embedding => {
            let service = build_embedding_service(&cfg.embedding);
            Arc::new(EmbeddingNotes::build(build_store(cfg)?, service).await?)
        }
    };
    tracing::info!(lookup = notes.name(), "note lookup ready");
    Ok(Some(notes))
}

fn build_store(cfg: &NotesConfig) -> Result<DocumentStore> {
    let mut store = DocumentStore::new(cfg.chunk_size);
    if cfg.docs.is_empty() {
        tracing::warn!("no documents configured for note lookup");
    }
    store.ingest_paths(&cfg.docs)?;
    Ok(store)
}

pub fn build_embedding_service(cfg: &EmbeddingConfig) -> Arc<dyn EmbeddingService> {
    match cfg.provider {
        EmbeddingProvider::Ollama => Arc::new(OllamaEmbeddingService::new(
            cfg.base_url.clone(),
            cfg.model.clone(),
            cfg.dimension,
        )),
        EmbeddingProvider::OpenAI => Arc::new(OpenAIEmbeddingService::new(
            cfg.base_url.clone(),
            cfg.api_key.clone(),
            cfg.model.clone(),
            cfg.dimension,
        )),
    }
}

/// Registry of the enabled built-in tools, or `None` when none are enabled.
pub fn build_tools(cfg: &AppConfig) -> Option<Arc<ToolRegistry>> {
    let mut registry = ToolRegistry::new();
    for name in &cfg.tools.enabled {
        match name.as_str() {
            "web_search" => registry.register(Arc::new(WebSearchTool)),
            other => tracing::warn!(tool = %other, "unknown tool in config, ignoring"),
        }
    }
    (!registry.is_empty()).then(|| Arc::new(registry))
}

pub fn build_sink(stream_format: &str) -> Box<dyn LogSink> {
    match stream_format {
        "jsonl" => Box::new(JsonlSink),
        // Anything other than jsonl behaves like text.
        _ => Box::new(TextSink),
    }
}
