use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::executor::ExecutorConfig;
use crate::planner::PlannerConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub planner: PlannerConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub tasks: TasksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "dayplan_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    false
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Which note lookup the executor consults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotesStrategy {
    None,
    #[default]
    Keyword,
    Substring,
    Embedding,
}

impl std::str::FromStr for NotesStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "keyword" => Ok(Self::Keyword),
            "substring" => Ok(Self::Substring),
            "embedding" => Ok(Self::Embedding),
            other => Err(format!("unknown notes strategy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub strategy: NotesStrategy,

    /// Glob patterns of documents ingested for substring/embedding lookup.
    #[serde(default)]
    pub docs: Vec<String>,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Replaces the built-in keyword knowledge base when set.
    #[serde(default)]
    pub keywords: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

fn default_chunk_size() -> usize {
    crate::notes::DEFAULT_CHUNK_SIZE
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            strategy: NotesStrategy::default(),
            docs: Vec::new(),
            chunk_size: default_chunk_size(),
            keywords: None,
            embedding: EmbeddingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    #[default]
    Ollama,
    OpenAI,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingProvider,

    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,
}

fn default_embedding_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_embedding_dimension() -> usize {
    768
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            api_key: String::new(),
            dimension: default_embedding_dimension(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Built-in tools to register. Unknown names are ignored with a warning.
    #[serde(default = "default_enabled_tools")]
    pub enabled: Vec<String>,
}

fn default_enabled_tools() -> Vec<String> {
    vec!["web_search".to_string()]
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_tools(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Task book used by `dayplan tasks` and as the default run input.
    #[serde(default = "default_book_path")]
    pub book: String,
}

fn default_book_path() -> String {
    "~/.dayplan/tasks.json".to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            book: default_book_path(),
        }
    }
}
