//! Upstream failure taxonomy for Discogs calls.

use thiserror::Error;

/// Errors that can occur while talking to the Discogs API.
#[derive(Debug, Error)]
pub enum DiscogsError {
    /// Connection, DNS, TLS or timeout failure before a response arrived.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// The body of a 2xx response was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("Client setup error: {0}")]
    Client(String),
}

impl DiscogsError {
    /// Create an upstream status error.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            status,
            url: url.into(),
        }
    }

    /// Create a client setup error.
    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }

    /// HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short label of the error kind, used in tool error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::Parse(_) => "parse",
            Self::Client(_) => "client",
        }
    }
}
