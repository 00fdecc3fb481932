//! Records produced by the parsers and emitted by the coordinator

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// One listing card extracted from a search-results page
///
/// Every field is optional: markup drifts, and a missing node is a normal
/// outcome rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRecord {
    /// Board-assigned listing key, used as the dedup key within a pass
    pub listing_id: Option<String>,

    /// Job title
    pub title: Option<String>,

    /// Hiring company
    pub company: Option<String>,

    /// Location text as displayed, unnormalized
    pub raw_location: Option<String>,

    /// Snippet shown on the results page, whitespace-collapsed
    pub summary: Option<String>,

    /// Absolute URL of the detail page
    pub url: Option<String>,
}

/// A listing enriched with its description, matched skills and provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedJob {
    pub listing: ListingRecord,
    pub detail_text: Option<String>,
    pub skills: BTreeSet<String>,
    pub topic: String,
    pub region: String,
    pub retrieved_at: DateTime<Utc>,
}

impl EnrichedJob {
    /// Text fed to the skill matcher: title, summary and detail, space-joined
    pub fn skill_text(listing: &ListingRecord, detail_text: Option<&str>) -> String {
        [
            listing.title.as_deref(),
            listing.summary.as_deref(),
            detail_text,
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Skills rendered the way the tabular outputs store them
    pub fn skills_joined(&self) -> String {
        self.skills.iter().map(String::as_str).collect::<Vec<_>>().join(";")
    }
}
