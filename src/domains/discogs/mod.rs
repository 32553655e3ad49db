//! Discogs API access layer.
//!
//! - `client`: async HTTP client shared by all tools
//! - `headers`: User-Agent / Authorization header construction
//! - `rate_limit`: leaky-bucket admission for outbound calls
//! - `models`: typed, defensively optional upstream payloads
//! - `error`: transport / status / parse failure taxonomy

pub mod client;
mod error;
pub mod headers;
pub mod models;
pub mod rate_limit;

pub use client::{DiscogsClient, QueryParams};
pub use error::DiscogsError;
pub use headers::build_headers;
pub use rate_limit::{LeakyBucket, RateLimit, RateLimitConfig};
