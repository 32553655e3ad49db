//! Typed views of Discogs API payloads.
//!
//! Discogs documents its responses loosely: almost any field may be missing,
//! and a few (`year`, `format`, `label`) change type between endpoints. Every
//! field here is optional or defaulted, and loosely typed values are kept as
//! raw JSON so they pass through unchanged.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /database/search` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchItem>,
}

/// A single search hit (release, master, artist or label).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub format: Option<Value>,
    #[serde(default)]
    pub label: Option<Value>,
    #[serde(default)]
    pub genre: Option<Value>,
    #[serde(default)]
    pub style: Option<Value>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

/// `GET /releases/{id}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<NamedEntity>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub formats: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<NamedEntity>,
    #[serde(default)]
    pub genres: Option<Value>,
    #[serde(default)]
    pub styles: Option<Value>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracklist: Vec<Track>,
    #[serde(default)]
    pub community: Option<Community>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Artist or label credit; only the name is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedEntity {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// Community block embedded in a release.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Community {
    #[serde(default)]
    pub want: Option<u64>,
    #[serde(default)]
    pub have: Option<u64>,
    #[serde(default)]
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// `GET /marketplace/stats/{id}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketplaceStats {
    #[serde(default)]
    pub lowest_price: Option<Price>,
    #[serde(default)]
    pub median: Option<Price>,
    #[serde(default)]
    pub highest_price: Option<Price>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}
