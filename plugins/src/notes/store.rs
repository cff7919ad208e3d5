//! In-memory document store: ingested files split into fixed-size chunks.

use std::path::Path;

use anyhow::Context;
use dayplan_core::api::{chunk_text, DocumentChunk, DEFAULT_CHUNK_SIZE};

#[derive(Debug, Clone)]
pub struct DocumentStore {
    chunk_size: usize,
    chunks: Vec<DocumentChunk>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl DocumentStore {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunks: Vec::new(),
        }
    }

    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk `text` and append it under `source`. Returns the number of chunks added.
    pub fn ingest_text(&mut self, source: &str, text: &str) -> usize {
        let pieces = chunk_text(text, self.chunk_size);
        let added = pieces.len();
        self.chunks.extend(
            pieces
                .into_iter()
                .enumerate()
                .map(|(idx, piece)| DocumentChunk::new(source, idx, piece)),
        );
        tracing::debug!(source, chunks = added, "document ingested");
        added
    }

    /// Read a text file (invalid UTF-8 is replaced) and ingest it under its file name.
    ///
    /// PDF files are skipped with a warning.
    pub fn ingest_file(&mut self, path: &Path) -> anyhow::Result<usize> {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            tracing::warn!(path = %path.display(), "PDF extraction not supported, skipping");
            return Ok(0);
        }

        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(self.ingest_text(&source, &String::from_utf8_lossy(&bytes)))
    }

    /// Expand glob patterns and ingest every matching file.
    pub fn ingest_paths<S: AsRef<str>>(&mut self, patterns: &[S]) -> anyhow::Result<usize> {
        let mut total = 0;
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let paths =
                glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
            let mut matched = 0;
            for entry in paths {
                let path = entry.with_context(|| format!("unreadable path for {pattern}"))?;
                if path.is_file() {
                    total += self.ingest_file(&path)?;
                    matched += 1;
                }
            }
            if matched == 0 {
                tracing::warn!(pattern, "no documents matched");
            }
        }
        tracing::info!(chunks = self.chunks.len(), "document store ready");
        Ok(total)
    }
}
