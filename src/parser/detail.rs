//! Detail page parser
//!
//! Known description containers are tried first, and the first one present
//! decides the result even when it is empty. When none matches, every
//! `<div>` in the document is scored by the length of its text and the
//! longest wins, first seen on ties. That fallback can capture page chrome
//! along with the description; it trades precision for recall on markup
//! nobody has seen yet.

use crate::parser::strategy::{block_text, compile, first_success, Strategy};
use scraper::{Html, Selector};

/// Description containers, highest priority first
const DESCRIPTION_SELECTORS: &[&str] = &[
    "#jobDescriptionText",
    "div.jobsearch-JobComponent-description",
];

/// Parser for a single listing's detail page
#[derive(Debug)]
pub struct DetailPageParser {
    description: Vec<Strategy>,
    fallback: Option<Selector>,
}

impl Default for DetailPageParser {
    fn default() -> Self {
        Self {
            description: DESCRIPTION_SELECTORS
                .iter()
                .filter_map(|css| Strategy::block_text(css))
                .collect(),
            fallback: compile("div"),
        }
    }
}

impl DetailPageParser {
    /// Extracts the description text, or None when nothing usable is found
    ///
    /// # Example
    ///
    /// ```
    /// use job_sift::parser::DetailPageParser;
    ///
    /// let html = r#"<div id="jobDescriptionText"><p>Build robots.</p><p>Use ROS.</p></div>"#;
    /// let text = DetailPageParser::default().parse(Some(html));
    /// assert_eq!(text.as_deref(), Some("Build robots.\nUse ROS."));
    /// ```
    pub fn parse(&self, html: Option<&str>) -> Option<String> {
        let html = html.filter(|h| !h.trim().is_empty())?;
        let document = Html::parse_document(html);

        if let Some(text) = first_success(&self.description, document.root_element()) {
            return Some(text).filter(|t| !t.is_empty());
        }

        tracing::debug!("No known description container, scanning all divs");
        self.longest_container(&document)
    }

    fn longest_container(&self, document: &Html) -> Option<String> {
        let selector = self.fallback.as_ref()?;
        let mut longest = String::new();
        let mut longest_len = 0;

        for candidate in document.select(selector) {
            let text = block_text(candidate);
            let len = text.chars().count();
            if len > longest_len {
                longest = text;
                longest_len = len;
            }
        }

        Some(longest).filter(|t| !t.is_empty())
    }
}
