//! How clients reach the server.
//!
//! Local MCP hosts spawn the binary and talk over stdin/stdout (`stdio`,
//! default feature). Hosted deployments build with `http` and expose
//! JSON-RPC on a port. Both hand requests to the same `McpServer`, so the
//! Discogs client and its rate limiter are shared whichever is active.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

#[cfg(feature = "http")]
pub use config::HttpConfig;
pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
