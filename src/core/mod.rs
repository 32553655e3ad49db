//! Process-level plumbing: configuration, errors, the MCP handler and the
//! transports that carry it.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{Config, DiscogsConfig, LoggingConfig};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
