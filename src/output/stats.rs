//! Run statistics
//!
//! The coordinator fills in one [`PairStatistics`] per (topic, region) pass;
//! the CLI prints the resulting [`RunReport`] at the end of a run.

use std::fmt;

/// Why pagination stopped for a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// Every configured page was walked
    #[default]
    PagesExhausted,
    /// A results page parsed to zero listings
    EmptyPage,
    /// A results page could not be fetched within the retry budget
    FetchFailed,
    /// The per-pair job cap was reached
    CapReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::PagesExhausted => "all pages walked",
            Self::EmptyPage => "empty results page",
            Self::FetchFailed => "results page fetch failed",
            Self::CapReached => "job cap reached",
        };
        f.write_str(text)
    }
}

/// Counters for one (topic, region) pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairStatistics {
    pub topic: String,
    pub region: String,

    /// Results pages fetched successfully
    pub pages_fetched: u32,

    /// Listing records parsed across all pages
    pub listings_parsed: usize,

    /// Records skipped because their key was already seen in this pass
    pub duplicates_skipped: usize,

    /// Enriched jobs produced
    pub jobs_emitted: usize,

    /// Detail pages that could not be fetched
    pub detail_failures: usize,

    pub stop_reason: StopReason,
}

impl PairStatistics {
    pub fn new(topic: &str, region: &str) -> Self {
        Self {
            topic: topic.to_string(),
            region: region.to_string(),
            ..Default::default()
        }
    }
}

/// Statistics for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub pairs: Vec<PairStatistics>,
}

impl RunReport {
    pub fn total_jobs(&self) -> usize {
        self.pairs.iter().map(|p| p.jobs_emitted).sum()
    }

    pub fn total_pages(&self) -> u32 {
        self.pairs.iter().map(|p| p.pages_fetched).sum()
    }

    pub fn total_duplicates(&self) -> usize {
        self.pairs.iter().map(|p| p.duplicates_skipped).sum()
    }

    pub fn total_detail_failures(&self) -> usize {
        self.pairs.iter().map(|p| p.detail_failures).sum()
    }
}

/// Prints a run report to stdout
pub fn print_report(report: &RunReport) {
    println!("=== Run Statistics ===\n");

    println!("Overview:");
    println!("  Pairs processed: {}", report.pairs.len());
    println!("  Results pages fetched: {}", report.total_pages());
    println!("  Jobs emitted: {}", report.total_jobs());
    println!("  Duplicates skipped: {}", report.total_duplicates());
    println!("  Detail fetch failures: {}", report.total_detail_failures());
    println!();

    println!("Per Pair:");
    for pair in &report.pairs {
        println!(
            "  {} / {}: {} jobs from {} pages ({})",
            pair.topic, pair.region, pair.jobs_emitted, pair.pages_fetched, pair.stop_reason
        );
    }
}
