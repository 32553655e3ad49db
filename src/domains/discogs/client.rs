//! Async HTTP client for the Discogs API.
//!
//! The client owns the shared `reqwest::Client` (headers and timeout are set
//! once at construction) and the optional rate limiter. Fetch methods never
//! acquire rate-limit tokens themselves: callers acquire one token per call
//! they are about to issue through [`DiscogsClient::acquire`].

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::error::DiscogsError;
use super::headers::build_headers;
use super::models::{MarketplaceStats, Release, SearchResponse};
use super::rate_limit::RateLimit;
use crate::core::config::DiscogsConfig;

/// Query parameters for an outbound request, in insertion order.
pub type QueryParams = Vec<(&'static str, String)>;

/// Shared handle to the Discogs API.
#[derive(Clone)]
pub struct DiscogsClient {
    http: reqwest::Client,
    base_url: String,
    site_url: String,
    limiter: Option<Arc<dyn RateLimit>>,
}

impl std::fmt::Debug for DiscogsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscogsClient")
            .field("base_url", &self.base_url)
            .field("site_url", &self.site_url)
            .field("rate_limited", &self.limiter.is_some())
            .finish()
    }
}

impl DiscogsClient {
    /// Build a client from configuration.
    pub fn new(config: &DiscogsConfig) -> Result<Self, DiscogsError> {
        let http = reqwest::Client::builder()
            .default_headers(build_headers(config.token.as_deref()))
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .map_err(|e| DiscogsError::client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            site_url: config.site_url.trim_end_matches('/').to_string(),
            limiter: config.rate_limit.build(),
        })
    }

    /// Replace the rate limiter (tests inject recording or no-op limiters).
    pub fn with_limiter(mut self, limiter: Option<Arc<dyn RateLimit>>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Public website origin used to build browsable URLs.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Wait for one rate-limit token, if a limiter is configured.
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.acquire().await;
        }
    }

    /// `GET /database/search`.
    pub async fn search(&self, params: &QueryParams) -> Result<SearchResponse, DiscogsError> {
        self.get_json("/database/search", params).await
    }

    /// `GET /releases/{id}`.
    pub async fn release(&self, release_id: u64) -> Result<Release, DiscogsError> {
        self.get_json(&format!("/releases/{release_id}"), &Vec::new())
            .await
    }

    /// `GET /marketplace/stats/{id}`.
    pub async fn marketplace_stats(
        &self,
        release_id: u64,
    ) -> Result<MarketplaceStats, DiscogsError> {
        self.get_json(&format!("/marketplace/stats/{release_id}"), &Vec::new())
            .await
    }

    #[instrument(level = "debug", skip(self, query))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<T, DiscogsError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        debug!("Discogs responded {} for {}", status, url);

        if !status.is_success() {
            return Err(DiscogsError::status(status.as_u16(), url));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
