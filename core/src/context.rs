use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::CliError;
use crate::executor::Executor;
use crate::notes::NoteLookup;
use crate::planner::Planner;
use crate::tools::ToolRegistry;

/// Collaborators injected into the executor.
#[derive(Clone, Default)]
pub struct Services {
    pub notes: Option<Arc<dyn NoteLookup>>,
    pub tools: Option<Arc<ToolRegistry>>,
}

#[async_trait::async_trait]
pub trait ServicesFactory: Send + Sync {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError>;
}

#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    services_factory: Option<Arc<dyn ServicesFactory>>,
}

impl AppContext {
    pub fn new(cfg: AppConfig, services_factory: Option<Arc<dyn ServicesFactory>>) -> Self {
        Self {
            cfg,
            services_factory,
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn with_config(&self, cfg: AppConfig) -> Self {
        Self {
            cfg,
            services_factory: self.services_factory.clone(),
        }
    }

    pub fn planner(&self) -> Planner {
        Planner::new(self.cfg.planner)
    }

    /// Build services for the current config. Without a factory the
    /// executor runs with no notes and no tools.
    pub async fn build_services(&self) -> Result<Services, CliError> {
        let Some(factory) = self.services_factory.as_ref() else {
            return Ok(Services::default());
        };
        factory.build_services(&self.cfg).await
    }

    /// Executor wired with the configured services.
    pub async fn executor(&self) -> Result<Executor, CliError> {
        let services = self.build_services().await?;
        let mut executor = Executor::new(self.cfg.executor.clone());
        if let Some(notes) = services.notes {
            executor = executor.with_notes(notes);
        }
        if let Some(tools) = services.tools {
            executor = executor.with_tools(tools);
        }
        Ok(executor)
    }
}
