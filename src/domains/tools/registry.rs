//! Name-based dispatch for the HTTP transport.
//!
//! rmcp routes stdio calls through the `ToolRouter`; JSON-RPC calls arrive
//! as a name plus raw arguments and are matched here instead.

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

#[cfg(test)]
use rmcp::model::Tool;

#[cfg(feature = "http")]
use super::ToolError;
#[cfg(any(test, feature = "http"))]
use super::definitions::{GetReleaseTool, SearchRecordsTool};
use crate::domains::discogs::DiscogsClient;

/// Dispatches tool calls by name against the shared client.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    client: Arc<DiscogsClient>,
}

impl ToolRegistry {
    pub fn new(client: Arc<DiscogsClient>) -> Self {
        Self { client }
    }

    /// Registered tool names, in listing order.
    #[cfg(test)]
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![SearchRecordsTool::NAME, GetReleaseTool::NAME]
    }

    #[cfg(test)]
    pub fn get_all_tools() -> Vec<Tool> {
        vec![SearchRecordsTool::to_tool(), GetReleaseTool::to_tool()]
    }

    /// Decode `arguments` for the named tool and run it.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            SearchRecordsTool::NAME => {
                SearchRecordsTool::http_handler(arguments, self.client.clone()).await
            }
            GetReleaseTool::NAME => GetReleaseTool::http_handler(arguments, self.client.clone()).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DiscogsConfig;

    fn test_client() -> Arc<DiscogsClient> {
        Arc::new(DiscogsClient::new(&DiscogsConfig::default()).unwrap())
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_client());
        let names = registry.tool_names();
        assert_eq!(names, vec!["search_records", "get_release"]);
    }

    #[test]
    fn test_all_tools_have_schemas() {
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), 2);
        for tool in tools {
            assert!(tool.description.is_some());
            assert!(tool.input_schema.contains_key("properties"));
        }
    }

    #[test]
    fn test_search_schema_exposes_filters() {
        let tool = SearchRecordsTool::to_tool();
        let props = tool.input_schema["properties"].as_object().unwrap();
        for key in ["query", "n", "type", "artist", "genre", "year", "format"] {
            assert!(props.contains_key(key), "missing {key}");
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_client());
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_invalid_arguments() {
        let registry = ToolRegistry::new(test_client());
        let result = registry
            .call_tool("get_release", serde_json::json!({"release_id": "abc"}))
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
