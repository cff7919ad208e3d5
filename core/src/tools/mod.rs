//! Named tool capabilities the executor may consult per task.

mod registry;

use async_trait::async_trait;
use serde_json::Value;

pub use registry::{first_result, ToolError, ToolRegistry};

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Invoke the tool with a JSON object payload.
    async fn call(&self, payload: Value) -> anyhow::Result<Value>;
}
