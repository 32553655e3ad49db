//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; the router only collects
//! them and hands every route the shared Discogs client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{GetReleaseTool, SearchRecordsTool};
use crate::domains::discogs::DiscogsClient;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<DiscogsClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SearchRecordsTool::create_route(client.clone()))
        .with_route(GetReleaseTool::create_route(client))
}
