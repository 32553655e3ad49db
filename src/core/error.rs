//! Crate-level error type.
//!
//! Wraps the per-layer errors so `main` and the HTTP transport can use `?`
//! across them.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Tool dispatch failed before the tool body ran.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// The Discogs client could not be built or a call failed.
    #[error("Discogs error: {0}")]
    Discogs(#[from] crate::domains::discogs::DiscogsError),

    /// Invalid configuration detected at startup.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
