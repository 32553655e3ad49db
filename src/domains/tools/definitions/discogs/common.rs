//! Common utilities shared across Discogs tools.
//!
//! Release ID extraction, page-size clamping, and the conversions from
//! results and upstream failures into `CallToolResult`s.

use std::sync::LazyLock;

use regex::Regex;
use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{error, warn};

use crate::domains::discogs::DiscogsError;

/// Discogs caps `per_page` at 100.
pub const MAX_PER_PAGE: i64 = 100;

static RELEASE_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/release/(\d+)").expect("release URI pattern is valid")
});

/// Default number of search results.
pub fn default_limit() -> i64 {
    5
}

pub fn default_true() -> bool {
    true
}

/// Accept an ID given either as a JSON number or as a numeric string
/// (`249504` or `"249504"`).
pub fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(id) => Ok(id),
        NumberOrString::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid ID {text:?}: {e}"))),
    }
}

/// Page size sent upstream: the requested count, capped at 100.
///
/// There is no lower bound; zero or negative values are forwarded as-is.
pub fn per_page(requested: i64) -> i64 {
    requested.min(MAX_PER_PAGE)
}

/// Extract the numeric release ID from a Discogs URI such as
/// `/release/123456-Artist-Title`. Masters, artists and labels yield `None`.
pub fn release_id_from_uri(uri: &str) -> Option<u64> {
    RELEASE_URI
        .captures(uri)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Build a success result carrying `data` as both JSON text and structured
/// content.
pub fn json_result<T: Serialize>(data: &T) -> CallToolResult {
    let structured = match serde_json::to_value(data) {
        Ok(value) => value,
        Err(e) => return error_result(&format!("Failed to serialize result: {}", e)),
    };
    let text = serde_json::to_string_pretty(&structured).unwrap_or_else(|_| structured.to_string());

    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(structured),
        is_error: Some(false),
        meta: None,
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Turn a failed primary call into a tool error result.
pub fn upstream_error_result(context: &str, err: &DiscogsError) -> CallToolResult {
    error!("{} failed ({}): {}", context, err.kind(), err);
    CallToolResult::error(vec![Content::text(format!(
        "{} failed [{}]: {}",
        context,
        err.kind(),
        err
    ))])
}

/// Convert a tool result into the JSON shape returned by the HTTP transport.
#[cfg(feature = "http")]
pub fn result_to_json(result: CallToolResult) -> serde_json::Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });
    if let (Some(structured), Some(obj)) = (result.structured_content, response.as_object_mut()) {
        obj.insert("structuredContent".to_string(), structured);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_id_from_uri() {
        assert_eq!(release_id_from_uri("/release/123456-Artist-Title"), Some(123456));
        assert_eq!(release_id_from_uri("/Nirvana-Nevermind/release/2286"), Some(2286));
        assert_eq!(release_id_from_uri("/master/789"), None);
        assert_eq!(release_id_from_uri("/artist/125246-Nirvana"), None);
        assert_eq!(release_id_from_uri(""), None);
    }

    #[test]
    fn test_release_id_overflow_is_none() {
        assert_eq!(release_id_from_uri("/release/99999999999999999999999"), None);
    }

    #[test]
    fn test_per_page() {
        assert_eq!(per_page(500), 100);
        assert_eq!(per_page(100), 100);
        assert_eq!(per_page(3), 3);
        assert_eq!(per_page(0), 0);
        assert_eq!(per_page(-2), -2);
    }

    #[test]
    fn test_json_result_structured() {
        let result = json_result(&serde_json::json!({"title": "Nevermind"}));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result.structured_content,
            Some(serde_json::json!({"title": "Nevermind"}))
        );
    }

    #[test]
    fn test_upstream_error_result_is_error() {
        let err = DiscogsError::status(503, "https://api.discogs.com/database/search");
        let result = upstream_error_result("Search", &err);
        assert_eq!(result.is_error, Some(true));
    }
}
