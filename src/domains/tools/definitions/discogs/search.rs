//! Discogs database search tool.
//!
//! Issues one search request, truncates the hits to the requested count, and
//! reshapes each hit into a compact record. With `include_stats`, every hit
//! that points at a release is enriched with community want/have/rating
//! counts fetched concurrently; a failed enrichment leaves those fields null.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::common::{
    default_limit, json_result, per_page, release_id_from_uri, upstream_error_result,
};
use crate::domains::discogs::models::{Community, SearchItem};
use crate::domains::discogs::{DiscogsClient, DiscogsError, QueryParams};

#[cfg(feature = "http")]
use super::common::result_to_json;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for `search_records`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchRecordsParams {
    /// Search query string.
    #[schemars(description = "Search query string")]
    pub query: String,

    /// Number of results to return.
    #[schemars(description = "Number of results to return (default 5, max 100)")]
    #[serde(default = "default_limit", alias = "limit")]
    pub n: i64,

    /// Result type filter.
    #[schemars(description = "Filter by type: release, master, artist, label")]
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[schemars(description = "Filter by artist name")]
    #[serde(default)]
    pub artist: Option<String>,

    #[schemars(description = "Filter by genre")]
    #[serde(default)]
    pub genre: Option<String>,

    #[schemars(description = "Filter by release year")]
    #[serde(default)]
    pub year: Option<String>,

    #[schemars(description = "Filter by format (e.g., Vinyl, CD, Cassette)")]
    #[serde(default)]
    pub format: Option<String>,

    /// Fetch community want/have/rating for each release hit.
    #[schemars(
        description = "Also fetch community stats (want, have, rating) for each release result. Costs one extra request per result (default false)"
    )]
    #[serde(default)]
    pub include_stats: bool,
}

impl SearchRecordsParams {
    /// Create params for a plain query with the default result count.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            n: default_limit(),
            kind: None,
            artist: None,
            genre: None,
            year: None,
            format: None,
            include_stats: false,
        }
    }

    /// Upstream query parameters: `q`, `per_page`, then each filter that is set.
    pub fn to_query(&self) -> QueryParams {
        let mut query = vec![
            ("q", self.query.clone()),
            ("per_page", per_page(self.n).to_string()),
        ];

        let filters = [
            ("type", &self.kind),
            ("artist", &self.artist),
            ("genre", &self.genre),
            ("year", &self.year),
            ("format", &self.format),
        ];
        query.extend(
            filters
                .into_iter()
                .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone()))),
        );

        query
    }

    /// Number of hits kept from the upstream page.
    fn keep(&self) -> usize {
        usize::try_from(self.n).unwrap_or(0)
    }
}

/// Community counters attached to a search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommunityStats {
    pub want: Option<u64>,
    pub have: Option<u64>,
    pub rating: Option<f64>,
}

impl From<Option<Community>> for CommunityStats {
    fn from(community: Option<Community>) -> Self {
        let community = community.unwrap_or_default();
        Self {
            want: community.want,
            have: community.have,
            rating: community.rating.and_then(|r| r.average),
        }
    }
}

/// One reshaped search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultItem {
    pub release_id: Option<u64>,
    pub title: Option<String>,
    pub year: Option<Value>,
    pub format: Option<Value>,
    pub label: Option<Value>,
    pub genre: Option<Value>,
    pub style: Option<Value>,
    pub country: Option<String>,
    pub url: String,
    pub thumb: Option<String>,
    /// Only present when stats were requested.
    #[serde(flatten)]
    pub stats: Option<CommunityStats>,
}

/// Structured content of a search call; MCP requires an object at the top.
#[derive(Debug, Serialize)]
struct SearchOutput {
    result: Vec<SearchResultItem>,
}

impl SearchResultItem {
    fn from_upstream(
        item: SearchItem,
        release_id: Option<u64>,
        stats: Option<CommunityStats>,
        site_url: &str,
    ) -> Self {
        let url = format!("{}{}", site_url, item.uri.as_deref().unwrap_or_default());
        Self {
            release_id,
            title: item.title,
            year: item.year,
            format: item.format,
            label: item.label,
            genre: item.genre,
            style: item.style,
            country: item.country,
            url,
            thumb: item.thumb,
            stats,
        }
    }
}

/// Discogs search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchRecordsTool;

impl SearchRecordsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_records";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search Discogs for records. Returns basic search results. Use get_release() for detailed info. Arguments: query (required), n (default 5, max 100), optional filters type (release, master, artist, label), artist, genre, year, format (e.g. Vinyl, CD, Cassette), include_stats.";

    /// Run the search and reshape the hits, keeping upstream order.
    #[instrument(skip_all, fields(query = %params.query, n = params.n, include_stats = params.include_stats))]
    pub async fn search(
        client: &DiscogsClient,
        params: &SearchRecordsParams,
    ) -> Result<Vec<SearchResultItem>, DiscogsError> {
        let query = params.to_query();

        client.acquire().await;
        let response = client.search(&query).await?;

        let items: Vec<SearchItem> = response.results.into_iter().take(params.keep()).collect();
        let ids: Vec<Option<u64>> = items
            .iter()
            .map(|item| item.uri.as_deref().and_then(release_id_from_uri))
            .collect();

        let stats: Vec<Option<CommunityStats>> = if params.include_stats {
            Self::fetch_stats(client, &ids)
                .await
                .into_iter()
                .map(Some)
                .collect()
        } else {
            vec![None; items.len()]
        };

        let site_url = client.site_url();
        Ok(items
            .into_iter()
            .zip(ids)
            .zip(stats)
            .map(|((item, id), stats)| SearchResultItem::from_upstream(item, id, stats, site_url))
            .collect())
    }

    /// Scatter one stats request per release ID and gather them by index.
    async fn fetch_stats(client: &DiscogsClient, ids: &[Option<u64>]) -> Vec<CommunityStats> {
        join_all(ids.iter().map(|id| async move {
            let Some(id) = *id else {
                return CommunityStats::default();
            };
            Self::community_stats(client, id)
                .await
                .unwrap_or_else(|e| {
                    warn!("Community stats for release {} unavailable: {}", id, e);
                    CommunityStats::default()
                })
        }))
        .await
    }

    async fn community_stats(
        client: &DiscogsClient,
        release_id: u64,
    ) -> Result<CommunityStats, DiscogsError> {
        client.acquire().await;
        let release = client.release(release_id).await?;
        Ok(CommunityStats::from(release.community))
    }

    /// Execute the tool logic.
    pub async fn execute(client: &DiscogsClient, params: &SearchRecordsParams) -> CallToolResult {
        info!("Searching Discogs for: {}", params.query);

        match Self::search(client, params).await {
            Ok(items) => {
                info!("Discogs search returned {} result(s)", items.len());
                json_result(&SearchOutput { result: items })
            }
            Err(e) => upstream_error_result("Discogs search", &e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: Value,
        client: Arc<DiscogsClient>,
    ) -> Result<Value, ToolError> {
        let params: SearchRecordsParams = serde_json::from_value(arguments)?;
        Ok(result_to_json(Self::execute(&client, &params).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchRecordsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(client: Arc<DiscogsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: SearchRecordsParams = serde_json::from_value(Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&client, &params).await)
            }
            .boxed()
        })
    }
}
