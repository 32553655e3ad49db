//! The MCP handler.
//!
//! `McpServer` owns the configuration and the single `DiscogsClient` every
//! tool call goes through. Over stdio, rmcp drives it through
//! `ServerHandler` and the tool router; over HTTP, the JSON-RPC transport
//! calls `list_tools` and `call_tool` directly.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Error;
use crate::domains::{discogs::DiscogsClient, tools::build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions advertised to clients on initialization.
pub const SERVER_INSTRUCTIONS: &str = "Discogs record catalog lookups. Use search_records to find releases, \
     masters, artists or labels, then get_release with a release_id for tracklist, \
     community stats and marketplace pricing.";

/// Discogs MCP server.
///
/// Cloning is cheap; clones share the client and therefore the rate limiter.
#[derive(Clone)]
pub struct McpServer {
    config: Arc<Config>,
    client: Arc<DiscogsClient>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Build the server and its Discogs client from `config`.
    pub fn new(config: Config) -> super::error::Result<Self> {
        if config.discogs.base_url.trim().is_empty() {
            return Err(Error::config("Discogs base URL must not be empty"));
        }

        let client = Arc::new(DiscogsClient::new(&config.discogs)?);
        info!("Discogs client ready: {:?}", client);

        Ok(Self::with_client(config, client))
    }

    /// Use an already built client (tests point it at a mock upstream).
    pub fn with_client(config: Config, client: Arc<DiscogsClient>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config: Arc::new(config),
            client,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn client(&self) -> &Arc<DiscogsClient> {
        &self.client
    }

    /// Tool metadata in the shape of an MCP `tools/list` entry.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Dispatch a JSON-RPC `tools/call`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> super::error::Result<serde_json::Value> {
        let registry = ToolRegistry::new(self.client.clone());
        Ok(registry.call_tool(name, arguments).await?)
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
