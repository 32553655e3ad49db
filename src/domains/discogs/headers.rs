//! Outbound identification and authorization headers.
//!
//! Discogs requires every request to carry a descriptive `User-Agent`.
//! Personal access tokens go in `Authorization: Discogs token=<token>`.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

/// User agent sent with every upstream request.
pub const DISCOGS_USER_AGENT: &str = "DiscogsMCP/1.0";

/// Build the header set shared by all outbound calls.
///
/// `Authorization` is only present when a non-empty token is configured.
/// A token containing bytes that cannot appear in a header is dropped
/// rather than sent malformed.
pub fn build_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DISCOGS_USER_AGENT));

    let auth = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .and_then(|t| HeaderValue::from_str(&format!("Discogs token={t}")).ok());

    if let Some(mut value) = auth {
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    headers
}
