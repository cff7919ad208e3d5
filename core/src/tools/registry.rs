use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::Tool;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Tool {0} not registered")]
    NotRegistered(String),

    #[error("tool {tool} failed: {source}")]
    Failed {
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("tool {0} returned no results")]
    EmptyResults(String),
}

/// Name → tool map. Registering a name twice replaces the earlier tool.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "tool re-registered, previous entry replaced");
        }
    }

    pub fn with(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub async fn call(&self, name: &str, payload: Value) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotRegistered(name.to_string()))?;
        tracing::debug!(tool = %name, "calling tool");
        tool.call(payload).await.map_err(|source| ToolError::Failed {
            tool: name.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

/// Headline of a tool response: `results[0]` when present, else the whole value.
/// An empty `results` array is an error.
pub fn first_result(tool: &str, value: &Value) -> Result<String, ToolError> {
    let headline = match value.get("results").and_then(Value::as_array) {
        Some(results) => match results.first() {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => return Err(ToolError::EmptyResults(tool.to_string())),
        },
        None => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    };
    Ok(headline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn call(&self, payload: Value) -> anyhow::Result<Value> {
            Ok(json!({ "results": [payload["query"].clone()] }))
        }
    }

    struct Broken;

    #[async_trait]
    impl Tool for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn call(&self, _payload: Value) -> anyhow::Result<Value> {
            anyhow::bail!("upstream unavailable")
        }
    }

    #[tokio::test]
    async fn calls_registered_tool() {
        let registry = ToolRegistry::new().with(Arc::new(Echo));
        let out = registry.call("echo", json!({"query": "hi"})).await.unwrap();
        assert_eq!(first_result("echo", &out).unwrap(), "hi");
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let registry = ToolRegistry::new();
        let err = registry.call("web_search", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotRegistered(ref n) if n == "web_search"));
        assert_eq!(err.to_string(), "Tool web_search not registered");
    }

    #[tokio::test]
    async fn tool_failure_is_wrapped() {
        let registry = ToolRegistry::new().with(Arc::new(Broken));
        let err = registry.call("broken", json!({})).await.unwrap_err();
        assert!(err.to_string().contains("upstream unavailable"));
    }

    #[test]
    fn names_are_sorted() {
        let registry = ToolRegistry::new().with(Arc::new(Echo)).with(Arc::new(Broken));
        assert_eq!(registry.names(), ["broken", "echo"]);
    }

    #[test]
    fn first_result_falls_back_to_whole_value() {
        assert_eq!(first_result("echo", &json!("plain")).unwrap(), "plain");
        assert_eq!(
            first_result("echo", &json!({"answer": 1})).unwrap(),
            r#"{"answer":1}"#
        );
    }

    #[test]
    fn empty_results_array_is_an_error() {
        let err = first_result("echo", &json!({"results": []})).unwrap_err();
        assert!(matches!(err, ToolError::EmptyResults(ref n) if n == "echo"));
        assert_eq!(err.to_string(), "tool echo returned no results");
    }
}
