//! MCP tools backed by the Discogs client.
//!
//! `search_records` and `get_release` live in `definitions/discogs/`, one
//! file each. Every tool exposes its params type, an `execute()` body, a
//! `create_route()` for the rmcp router and an `http_handler()` for the
//! JSON-RPC transport. All of them share one `DiscogsClient`, and therefore
//! one rate limiter.
//!
//! A new tool needs a route in `router.rs` and an arm in
//! `ToolRegistry::call_tool`; the router test checks the two lists agree.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
