//! Discogs tools module.
//!
//! - `search`: `search_records`, database search with optional community stats
//! - `release`: `get_release`, release detail merged with marketplace pricing
//!
//! Each tool has handlers for both HTTP and STDIO transports.

pub mod common;
pub mod release;
pub mod search;

pub use release::{GetReleaseParams, GetReleaseTool, ReleaseDetail};
pub use search::{SearchRecordsParams, SearchRecordsTool, SearchResultItem};
