//! HTML parsers for search-results and detail pages
//!
//! Parsers treat markup as untrusted and never fail: missing or malformed
//! nodes degrade to absent fields, empty record lists, or no text.

mod detail;
mod listing;
pub mod strategy;

pub use detail::DetailPageParser;
pub use listing::ListingPageParser;

use crate::models::ListingRecord;
use std::sync::OnceLock;

/// Parses a results page with the built-in region table
///
/// # Example
///
/// ```
/// use job_sift::parser::parse_listings;
///
/// assert!(parse_listings("", Some("Germany"), None).is_empty());
/// ```
pub fn parse_listings(html: &str, region: Option<&str>, domain: Option<&str>) -> Vec<ListingRecord> {
    static PARSER: OnceLock<ListingPageParser> = OnceLock::new();
    PARSER
        .get_or_init(ListingPageParser::default)
        .parse(html, region, domain)
}

/// Extracts the description text of a detail page
pub fn parse_detail(html: Option<&str>) -> Option<String> {
    static PARSER: OnceLock<DetailPageParser> = OnceLock::new();
    PARSER.get_or_init(DetailPageParser::default).parse(html)
}
