//! Search-results page parser
//!
//! Listing cards are located through tiers of container selectors. Only the
//! first tier that matches anything is used; tiers are never merged. Each
//! field of a card then goes through its own ordered list of strategies.

use crate::models::ListingRecord;
use crate::parser::strategy::{compile, first_success, Strategy};
use crate::url::{detail_url, resolve_href, RegionTable};
use scraper::{ElementRef, Html, Selector};

/// Container selectors, highest priority first
const CONTAINER_TIERS: &[&str] = &[
    "article[data-jk]",
    "div.job_seen_beacon, div.jobsearch-SerpJobCard",
    "a.tapItem",
];

/// Attributes that may carry the listing key
const ID_ATTRIBUTES: &[&str] = &["data-jk", "data-jobkey", "data-vjk"];

const TITLE_SELECTORS: &[&str] = &["h2.jobTitle", "a.jobtitle", "a.tapItem h2"];
const COMPANY_SELECTORS: &[&str] = &["span.companyName", "div.company", "span.company"];
const LOCATION_SELECTORS: &[&str] = &["div.companyLocation", "span.companyLocation"];
const SUMMARY_SELECTORS: &[&str] = &["div.job-snippet", "div.summary"];

/// Parser for search-results pages
///
/// Never fails: unknown or broken markup produces fewer records, or none.
#[derive(Debug)]
pub struct ListingPageParser {
    regions: RegionTable,
    container_tiers: Vec<Selector>,
    link: Option<Selector>,
    id: Vec<Strategy>,
    title: Vec<Strategy>,
    company: Vec<Strategy>,
    location: Vec<Strategy>,
    summary: Vec<Strategy>,
}

impl Default for ListingPageParser {
    fn default() -> Self {
        Self::new(RegionTable::default())
    }
}

impl ListingPageParser {
    /// Creates a parser resolving relative links through `regions`
    pub fn new(regions: RegionTable) -> Self {
        Self {
            regions,
            container_tiers: CONTAINER_TIERS.iter().filter_map(|css| compile(css)).collect(),
            link: compile("a"),
            id: ID_ATTRIBUTES.iter().map(|name| Strategy::attr(name)).collect(),
            title: text_strategies(TITLE_SELECTORS),
            company: text_strategies(COMPANY_SELECTORS),
            location: text_strategies(LOCATION_SELECTORS),
            summary: SUMMARY_SELECTORS
                .iter()
                .filter_map(|css| Strategy::spaced_text(css))
                .collect(),
        }
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Parses a results page into listing records
    ///
    /// # Arguments
    ///
    /// * `html` - Raw page markup
    /// * `region` - Region the page was fetched for, used to pick the base domain
    /// * `domain` - Explicit base domain, overriding the region lookup
    ///
    /// # Example
    ///
    /// ```
    /// use job_sift::parser::ListingPageParser;
    ///
    /// let html = r#"<div class="job_seen_beacon" data-jk="k1">
    ///     <h2 class="jobTitle">Controls Engineer</h2></div>"#;
    /// let records = ListingPageParser::default().parse(html, Some("Germany"), None);
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(records[0].url.as_deref(), Some("https://de.indeed.com/viewjob?jk=k1"));
    /// ```
    pub fn parse(&self, html: &str, region: Option<&str>, domain: Option<&str>) -> Vec<ListingRecord> {
        if html.trim().is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(html);
        let base_domain = self.regions.base_domain(region, domain);

        let cards = self.locate_cards(&document);
        tracing::debug!("Found {} listing containers", cards.len());

        cards
            .into_iter()
            .map(|card| self.parse_card(card, base_domain))
            .collect()
    }

    /// Cards from the first container tier with any match
    fn locate_cards<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        self.container_tiers
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|cards| !cards.is_empty())
            .unwrap_or_default()
    }

    fn parse_card(&self, card: ElementRef<'_>, base_domain: &str) -> ListingRecord {
        let listing_id = first_success(&self.id, card);

        let url = self
            .link
            .as_ref()
            .and_then(|selector| card.select(selector).next())
            .and_then(|anchor| anchor.value().attr("href"))
            .and_then(|href| resolve_href(href, base_domain))
            .or_else(|| listing_id.as_deref().map(|id| detail_url(base_domain, id)));

        ListingRecord {
            title: first_success(&self.title, card),
            company: first_success(&self.company, card),
            raw_location: first_success(&self.location, card),
            summary: first_success(&self.summary, card),
            listing_id,
            url,
        }
    }
}

fn text_strategies(selectors: &[&str]) -> Vec<Strategy> {
    selectors.iter().filter_map(|css| Strategy::text(css)).collect()
}
