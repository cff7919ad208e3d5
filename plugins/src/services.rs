//! ServicesFactory implementation: builds note lookup and tools from config for the CLI.
use async_trait::async_trait;
use dayplan_core::api::{AppConfig, CliError, Services, ServicesFactory};

use crate::factory;

#[derive(Debug, Default, Clone, Copy)]
pub struct PluginServicesFactory;

#[async_trait]
impl ServicesFactory for PluginServicesFactory {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError> {
        let notes = factory::build_notes(cfg)
            .await
            .map_err(|e| CliError::Command(format!("note lookup setup failed: {e:#}")))?;
        let tools = factory::build_tools(cfg);
        Ok(Services { notes, tools })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayplan_core::api::NotesStrategy;

    #[tokio::test]
    async fn default_config_wires_keyword_notes_and_web_search() {
        let services = PluginServicesFactory
            .build_services(&AppConfig::default())
            .await
            .unwrap();
        assert_eq!(services.notes.unwrap().name(), "keyword");
        assert_eq!(services.tools.unwrap().names(), ["web_search"]);
    }

    #[tokio::test]
    async fn embedding_setup_failure_is_a_command_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "text").unwrap();
        let mut cfg = AppConfig::default();
        cfg.notes.strategy = NotesStrategy::Embedding;
        cfg.notes.docs = vec![format!("{}/*.md", dir.path().display())];
        cfg.notes.embedding.base_url = "http://127.0.0.1:9".to_string();

        let err = PluginServicesFactory.build_services(&cfg).await.err().unwrap();
        assert_eq!(err.exit_code(), 20);
    }
}
