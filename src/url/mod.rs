//! URL handling module for Job-Sift
//!
//! This module provides the region → board domain table and the helpers that
//! turn listing hrefs and keys into absolute URLs.

mod region;
mod resolve;

// Re-export main types and functions
pub use region::{RegionTable, DEFAULT_DOMAIN};
pub use resolve::{detail_url, resolve_href, search_url};
