//! Discogs MCP Server Library
//!
//! A Model Context Protocol server that lets assistants search the Discogs
//! music database and fetch release details with community statistics and
//! marketplace pricing.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**
//!   - **discogs**: rate-limited HTTP client and upstream payload models
//!   - **tools**: the `search_records` and `get_release` MCP tools
//!
//! # Example
//!
//! ```rust,no_run
//! use discogs_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
