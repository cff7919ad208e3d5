use async_trait::async_trait;
use dayplan_core::api::Tool;
use serde_json::{json, Value};

/// Offline stand-in for a web search: two canned results echoing the query.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSearchTool;

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Simulated web search (payload: {\"query\": string})"
    }

    async fn call(&self, payload: Value) -> anyhow::Result<Value> {
        let query = payload
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("missing string field `query`"))?;
        Ok(json!({
            "results": [
                format!("Simulated search result for '{query}' (1)"),
                format!("Simulated search result for '{query}' (2)"),
            ]
        }))
    }
}
