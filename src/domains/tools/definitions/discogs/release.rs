//! Discogs release detail tool.
//!
//! Fetches a release and, optionally, its marketplace price statistics in
//! parallel. The release call is mandatory; the marketplace call is
//! best-effort and any failure there leaves the pricing fields null.

use std::sync::Arc;

use futures::FutureExt;
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
    default_true, id_from_number_or_string, json_result, upstream_error_result,
};
use crate::domains::discogs::models::{MarketplaceStats, Release, Track};
use crate::domains::discogs::{DiscogsClient, DiscogsError};

#[cfg(feature = "http")]
use super::common::result_to_json;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for `get_release`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetReleaseParams {
    /// The Discogs release ID.
    #[schemars(description = "The Discogs release ID", with = "u64")]
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub release_id: u64,

    /// Whether to query marketplace price statistics.
    #[schemars(description = "Include marketplace pricing (default true)")]
    #[serde(default = "default_true")]
    pub include_pricing: bool,
}

impl GetReleaseParams {
    pub fn new(release_id: u64) -> Self {
        Self {
            release_id,
            include_pricing: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackEntry {
    pub position: Option<String>,
    pub title: Option<String>,
    pub duration: Option<String>,
}

impl From<Track> for TrackEntry {
    fn from(track: Track) -> Self {
        Self {
            position: track.position,
            title: track.title,
            duration: track.duration,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommunitySummary {
    pub want: Option<u64>,
    pub have: Option<u64>,
    pub rating: Option<f64>,
    pub ratings_count: Option<u64>,
}

/// Marketplace prices; all null when unavailable or when the lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pricing {
    pub lowest_price: Option<f64>,
    pub median_price: Option<f64>,
    pub highest_price: Option<f64>,
}

impl From<MarketplaceStats> for Pricing {
    fn from(stats: MarketplaceStats) -> Self {
        Self {
            lowest_price: stats.lowest_price.and_then(|p| p.value),
            median_price: stats.median.and_then(|p| p.value),
            highest_price: stats.highest_price.and_then(|p| p.value),
        }
    }
}

/// Reshaped release returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseDetail {
    pub title: Option<String>,
    /// One slot per upstream credit; `None` where the credit has no name.
    pub artists: Vec<Option<String>>,
    pub year: Option<Value>,
    pub formats: Option<Value>,
    pub labels: Vec<Option<String>>,
    pub genres: Option<Value>,
    pub styles: Option<Value>,
    pub country: Option<String>,
    pub tracklist: Vec<TrackEntry>,
    pub community: CommunitySummary,
    pub pricing: Pricing,
    pub url: Option<String>,
}

impl ReleaseDetail {
    fn from_upstream(release: Release, pricing: Pricing) -> Self {
        let community = release.community.unwrap_or_default();
        let rating = community.rating.unwrap_or_default();

        Self {
            title: release.title,
            artists: release.artists.into_iter().map(|a| a.name).collect(),
            year: release.year,
            formats: release.formats,
            labels: release.labels.into_iter().map(|l| l.name).collect(),
            genres: release.genres,
            styles: release.styles,
            country: release.country,
            tracklist: release.tracklist.into_iter().map(TrackEntry::from).collect(),
            community: CommunitySummary {
                want: community.want,
                have: community.have,
                rating: rating.average,
                ratings_count: rating.count,
            },
            pricing,
            url: release.uri,
        }
    }
}

/// Discogs release lookup tool implementation.
#[derive(Debug, Clone)]
pub struct GetReleaseTool;

impl GetReleaseTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_release";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get detailed info about a specific Discogs release, including tracklist, community stats and marketplace pricing. Arguments: release_id (the Discogs release ID), include_pricing (default true).";

    /// Fetch and merge release detail and pricing.
    #[instrument(skip_all, fields(release_id = params.release_id))]
    pub async fn fetch(
        client: &DiscogsClient,
        params: &GetReleaseParams,
    ) -> Result<ReleaseDetail, DiscogsError> {
        let release_id = params.release_id;

        // One token per request about to be dispatched.
        client.acquire().await;
        if params.include_pricing {
            client.acquire().await;
        }

        let pricing = async {
            if !params.include_pricing {
                return Pricing::default();
            }
            client
                .marketplace_stats(release_id)
                .await
                .map(Pricing::from)
                .unwrap_or_else(|e| {
                    warn!("Pricing for release {} unavailable: {}", release_id, e);
                    Pricing::default()
                })
        };

        let (release, pricing) = tokio::join!(client.release(release_id), pricing);

        Ok(ReleaseDetail::from_upstream(release?, pricing))
    }

    /// Execute the tool logic.
    pub async fn execute(client: &DiscogsClient, params: &GetReleaseParams) -> CallToolResult {
        info!("Fetching Discogs release {}", params.release_id);

        match Self::fetch(client, params).await {
            Ok(detail) => json_result(&detail),
            Err(e) => upstream_error_result(
                &format!("Fetching release {}", params.release_id),
                &e,
            ),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: Value,
        client: Arc<DiscogsClient>,
    ) -> Result<Value, ToolError> {
        let params: GetReleaseParams = serde_json::from_value(arguments)?;
        Ok(result_to_json(Self::execute(&client, &params).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetReleaseParams>(),
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
                let params: GetReleaseParams = serde_json::from_value(Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&client, &params).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DiscogsConfig;
    use crate::domains::discogs::rate_limit::CountingLimiter;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DiscogsClient {
        let config = DiscogsConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        DiscogsClient::new(&config).unwrap().with_limiter(None)
    }

    fn release_body() -> Value {
        serde_json::json!({
            "id": 249504,
            "title": "Never Gonna Give You Up",
            "artists": [{"name": "Rick Astley", "id": 72872}, {"id": 1}],
            "year": 1987,
            "formats": [{"name": "Vinyl", "qty": "1", "descriptions": ["7\"", "45 RPM"]}],
            "labels": [{"name": "RCA", "catno": "PB 41447"}],
            "genres": ["Electronic", "Pop"],
            "styles": ["Synth-pop"],
            "country": "UK",
            "tracklist": [
                {"position": "A", "title": "Never Gonna Give You Up", "duration": "3:32"},
                {"position": "B", "title": "Never Gonna Give You Up (Instrumental)"}
            ],
            "community": {"want": 453, "have": 1632, "rating": {"average": 3.42, "count": 221}},
            "uri": "https://www.discogs.com/release/249504-Rick-Astley-Never-Gonna-Give-You-Up"
        })
    }

    async fn mount_release(server: &MockServer, id: u64, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/releases/{id}")))
            .respond_with(response)
            .mount(server)
            .await;
    }

    async fn mount_pricing(server: &MockServer, id: u64, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/marketplace/stats/{id}")))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[test]
    fn test_params_default_pricing() {
        let params: GetReleaseParams = serde_json::from_str(r#"{"release_id": 42}"#).unwrap();
        assert_eq!(params.release_id, 42);
        assert!(params.include_pricing);
    }

    #[test]
    fn test_params_accept_numeric_string_id() {
        let params: GetReleaseParams =
            serde_json::from_str(r#"{"release_id": "249504", "include_pricing": false}"#).unwrap();
        assert_eq!(params.release_id, 249504);
        assert!(!params.include_pricing);

        assert!(serde_json::from_str::<GetReleaseParams>(r#"{"release_id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<GetReleaseParams>(r#"{"release_id": -1}"#).is_err());
        assert!(serde_json::from_str::<GetReleaseParams>(r#"{}"#).is_err());
    }

    #[test]
    fn test_release_id_schema_stays_integer() {
        let tool = GetReleaseTool::to_tool();
        let release_id = &tool.input_schema["properties"]["release_id"];
        assert_eq!(release_id["type"], "integer");
    }

    #[tokio::test]
    async fn test_release_with_pricing() {
        let server = MockServer::start().await;
        mount_release(&server, 249504, ResponseTemplate::new(200).set_body_json(release_body())).await;
        mount_pricing(
            &server,
            249504,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "lowest_price": {"currency": "USD", "value": 2.5},
                "median": {"currency": "USD", "value": 6.0},
                "highest_price": {"currency": "USD", "value": 40.0},
                "num_for_sale": 58
            })),
        )
        .await;

        let client = client_for(&server);
        let detail = GetReleaseTool::fetch(&client, &GetReleaseParams::new(249504))
            .await
            .unwrap();

        assert_eq!(detail.title.as_deref(), Some("Never Gonna Give You Up"));
        assert_eq!(detail.artists, vec![Some("Rick Astley".to_string()), None]);
        assert_eq!(detail.labels, vec![Some("RCA".to_string())]);
        assert_eq!(detail.year, Some(serde_json::json!(1987)));
        assert_eq!(detail.tracklist.len(), 2);
        assert_eq!(detail.tracklist[0].duration.as_deref(), Some("3:32"));
        assert_eq!(detail.tracklist[1].duration, None);
        assert_eq!(
            detail.community,
            CommunitySummary {
                want: Some(453),
                have: Some(1632),
                rating: Some(3.42),
                ratings_count: Some(221),
            }
        );
        assert_eq!(
            detail.pricing,
            Pricing {
                lowest_price: Some(2.5),
                median_price: Some(6.0),
                highest_price: Some(40.0),
            }
        );
        assert!(detail.url.unwrap().ends_with("/release/249504-Rick-Astley-Never-Gonna-Give-You-Up"));
    }

    #[tokio::test]
    async fn test_pricing_failure_is_swallowed() {
        let server = MockServer::start().await;
        mount_release(&server, 1, ResponseTemplate::new(200).set_body_json(release_body())).await;
        mount_pricing(&server, 1, ResponseTemplate::new(401)).await;

        let client = client_for(&server);
        let detail = GetReleaseTool::fetch(&client, &GetReleaseParams::new(1))
            .await
            .unwrap();

        assert_eq!(detail.pricing, Pricing::default());
        assert_eq!(
            serde_json::to_value(&detail.pricing).unwrap(),
            serde_json::json!({"lowest_price": null, "median_price": null, "highest_price": null})
        );
    }

    #[tokio::test]
    async fn test_malformed_pricing_is_swallowed() {
        let server = MockServer::start().await;
        mount_release(&server, 2, ResponseTemplate::new(200).set_body_json(release_body())).await;
        mount_pricing(&server, 2, ResponseTemplate::new(200).set_body_string("not json")).await;

        let client = client_for(&server);
        let detail = GetReleaseTool::fetch(&client, &GetReleaseParams::new(2))
            .await
            .unwrap();
        assert_eq!(detail.pricing, Pricing::default());
        assert_eq!(detail.community.want, Some(453));
    }

    #[tokio::test]
    async fn test_slow_pricing_times_out_to_nulls() {
        let server = MockServer::start().await;
        mount_release(&server, 7, ResponseTemplate::new(200).set_body_json(release_body())).await;
        mount_pricing(
            &server,
            7,
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"lowest_price": {"value": 1.0}}))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .await;

        let config = DiscogsConfig {
            base_url: server.uri(),
            request_timeout_secs: 1,
            ..Default::default()
        };
        let client = DiscogsClient::new(&config).unwrap().with_limiter(None);

        let detail = GetReleaseTool::fetch(&client, &GetReleaseParams::new(7))
            .await
            .unwrap();
        assert_eq!(detail.title.as_deref(), Some("Never Gonna Give You Up"));
        assert_eq!(detail.pricing, Pricing::default());
    }

    #[tokio::test]
    async fn test_release_failure_fails_whole_call() {
        let server = MockServer::start().await;
        mount_release(&server, 3, ResponseTemplate::new(404)).await;
        mount_pricing(
            &server,
            3,
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"lowest_price": {"value": 1.0}})),
        )
        .await;

        let client = client_for(&server);
        let err = GetReleaseTool::fetch(&client, &GetReleaseParams::new(3))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));

        let result = GetReleaseTool::execute(&client, &GetReleaseParams::new(3)).await;
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_sparse_release_defaults_to_nulls() {
        let server = MockServer::start().await;
        mount_release(&server, 4, ResponseTemplate::new(200).set_body_json(serde_json::json!({}))).await;

        let client = client_for(&server);
        let params = GetReleaseParams {
            release_id: 4,
            include_pricing: false,
        };
        let detail = GetReleaseTool::fetch(&client, &params).await.unwrap();

        assert_eq!(detail.title, None);
        assert!(detail.artists.is_empty());
        assert!(detail.tracklist.is_empty());
        assert_eq!(detail.community, CommunitySummary::default());
        assert_eq!(detail.pricing, Pricing::default());
        assert_eq!(detail.url, None);
    }

    #[tokio::test]
    async fn test_one_token_per_request() {
        let server = MockServer::start().await;
        mount_release(&server, 5, ResponseTemplate::new(200).set_body_json(release_body())).await;
        mount_pricing(&server, 5, ResponseTemplate::new(200).set_body_json(serde_json::json!({}))).await;

        let limiter = Arc::new(CountingLimiter::default());
        let client = client_for(&server).with_limiter(Some(limiter.clone()));

        GetReleaseTool::fetch(&client, &GetReleaseParams::new(5))
            .await
            .unwrap();
        assert_eq!(limiter.count(), 2);

        let params = GetReleaseParams {
            release_id: 5,
            include_pricing: false,
        };
        GetReleaseTool::fetch(&client, &params).await.unwrap();
        assert_eq!(limiter.count(), 3);

        let requests = server.received_requests().await.unwrap();
        let pricing_calls = requests
            .iter()
            .filter(|r| r.url.path() == "/marketplace/stats/5")
            .count();
        assert_eq!(pricing_calls, 1);
    }

    #[tokio::test]
    async fn test_execute_returns_structured_detail() {
        let server = MockServer::start().await;
        mount_release(&server, 6, ResponseTemplate::new(200).set_body_json(release_body())).await;
        mount_pricing(&server, 6, ResponseTemplate::new(500)).await;

        let client = client_for(&server);
        let result = GetReleaseTool::execute(&client, &GetReleaseParams::new(6)).await;
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["community"]["ratings_count"], 221);
        assert_eq!(structured["artists"], serde_json::json!(["Rick Astley", null]));
        assert_eq!(structured["pricing"]["median_price"], Value::Null);
    }
}
