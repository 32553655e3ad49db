//! Domains module containing business logic organized by bounded contexts.
//!
//! - **discogs**: upstream API access (client, models, rate limiting)
//! - **tools**: MCP tools built on top of the Discogs client

pub mod discogs;
pub mod tools;
