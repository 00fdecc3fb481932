//! Scrape coordinator - main harvesting loop
//!
//! This module walks every (topic, region) pair in order, including:
//! - Paginating search-results pages through the fetcher
//! - Deduplicating listings within a pair
//! - Optional detail-page enrichment
//! - Skill tagging and per-pair caps

use crate::config::{validate, Config};
use crate::crawler::{FetchRequest, Fetcher, Pacer, TokioPacer};
use crate::models::{EnrichedJob, ListingRecord};
use crate::output::{PairStatistics, RunReport, StopReason};
use crate::parser::{DetailPageParser, ListingPageParser};
use crate::skills::{MatchOptions, SkillMatcher, SkillTaxonomy};
use crate::url::{search_url, RegionTable};
use crate::SiftError;
use chrono::Utc;
use std::collections::HashSet;

/// One (topic, region) pass as it would be executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPair {
    pub topic: String,
    pub region: String,
    pub search_url: String,
}

/// Main scrape coordinator structure
pub struct Coordinator<P: Pacer = TokioPacer> {
    config: Config,
    fetcher: Fetcher<P>,
    listings: ListingPageParser,
    details: DetailPageParser,
    matcher: SkillMatcher,
    options: MatchOptions,
}

impl Coordinator<TokioPacer> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The full configuration, CLI overrides already applied
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Configuration is complete and valid
    /// * `Err(SiftError)` - Missing topics/regions, invalid settings or HTTP client setup failure
    pub fn new(config: Config) -> Result<Self, SiftError> {
        let fetcher = Fetcher::new(&config.fetcher)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<P: Pacer> Coordinator<P> {
    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Fetcher<P>) -> Result<Self, SiftError> {
        validate(&config)?;

        let regions = RegionTable::with_overrides(&config.regions);
        let taxonomy = SkillTaxonomy::builtin().with_overrides(&config.skills)?;
        let options = MatchOptions::from(&config.matching);

        Ok(Self {
            listings: ListingPageParser::new(regions),
            details: DetailPageParser::default(),
            matcher: SkillMatcher::new(taxonomy),
            options,
            fetcher,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lists the pairs a run would walk, in order, without touching the network
    pub fn plan(&self) -> Vec<PlannedPair> {
        let regions = self.listings.regions();
        let mut pairs = Vec::new();
        for topic in &self.config.scrape.topics {
            for region in &self.config.scrape.regions {
                pairs.push(PlannedPair {
                    topic: topic.clone(),
                    region: region.clone(),
                    search_url: search_url(regions.resolve(Some(region.as_str()))),
                });
            }
        }
        pairs
    }

    /// Runs every (topic, region) pair sequentially
    ///
    /// Failures inside a pair are logged and end that pair only; the run
    /// itself does not fail once the coordinator is built.
    pub async fn run(&self) -> (Vec<EnrichedJob>, RunReport) {
        let start_time = std::time::Instant::now();
        let mut jobs = Vec::new();
        let mut report = RunReport::default();

        for topic in &self.config.scrape.topics {
            for region in &self.config.scrape.regions {
                let stats = self.run_pair(topic, region, &mut jobs).await;
                report.pairs.push(stats);
            }
        }

        tracing::info!(
            "Scrape completed: {} jobs from {} pages across {} pairs in {:?}",
            report.total_jobs(),
            report.total_pages(),
            report.pairs.len(),
            start_time.elapsed()
        );

        (jobs, report)
    }

    /// Walks the results pages of one pair, appending its jobs to `jobs`
    pub async fn run_pair(
        &self,
        topic: &str,
        region: &str,
        jobs: &mut Vec<EnrichedJob>,
    ) -> PairStatistics {
        let scrape = &self.config.scrape;
        let base = self.listings.regions().resolve(Some(region)).to_string();
        let mut stats = PairStatistics::new(topic, region);
        let mut seen: HashSet<String> = HashSet::new();

        tracing::info!("Scraping '{}' in {} ({})", topic, region, base);

        'pages: for page in 0..scrape.pages {
            let request = FetchRequest::get(search_url(&base))
                .query("q", topic)
                .query("l", region)
                .query("start", u64::from(page) * u64::from(scrape.page_size));

            let html = match self.fetcher.fetch(&request).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::error!("Failed to fetch page {} for '{}' in {}: {}", page, topic, region, e);
                    stats.stop_reason = StopReason::FetchFailed;
                    break;
                }
            };
            stats.pages_fetched += 1;

            let records = self.listings.parse(&html, Some(region), Some(&base));
            if records.is_empty() {
                tracing::info!("No listings on page {} for '{}' in {}, stopping", page, topic, region);
                stats.stop_reason = StopReason::EmptyPage;
                break;
            }
            tracing::debug!("Parsed {} listings from page {}", records.len(), page);
            stats.listings_parsed += records.len();

            for record in records {
                if let Some(id) = &record.listing_id {
                    if !seen.insert(id.clone()) {
                        stats.duplicates_skipped += 1;
                        continue;
                    }
                }

                let job = self.enrich(record, topic, region, &mut stats).await;
                jobs.push(job);
                stats.jobs_emitted += 1;

                if stats.jobs_emitted >= scrape.max_jobs_per_pair {
                    tracing::info!(
                        "Reached cap of {} jobs for '{}' in {}",
                        scrape.max_jobs_per_pair,
                        topic,
                        region
                    );
                    stats.stop_reason = StopReason::CapReached;
                    break 'pages;
                }
            }
        }

        tracing::info!(
            "Finished '{}' in {}: {} jobs, {} pages ({})",
            topic,
            region,
            stats.jobs_emitted,
            stats.pages_fetched,
            stats.stop_reason
        );

        stats
    }

    /// Fetches the detail page if enabled and tags skills
    async fn enrich(
        &self,
        listing: ListingRecord,
        topic: &str,
        region: &str,
        stats: &mut PairStatistics,
    ) -> EnrichedJob {
        let detail_text = match (&listing.url, self.config.scrape.fetch_details) {
            (Some(url), true) => match self.fetcher.fetch_url(url).await {
                Ok(html) => self.details.parse(Some(&html)),
                Err(e) => {
                    tracing::warn!("Failed to fetch details from {}: {}", url, e);
                    stats.detail_failures += 1;
                    None
                }
            },
            _ => None,
        };

        let text = EnrichedJob::skill_text(&listing, detail_text.as_deref());
        let skills = self.matcher.find_with(Some(&text), self.options);

        EnrichedJob {
            listing,
            detail_text,
            skills,
            topic: topic.to_string(),
            region: region.to_string(),
            retrieved_at: Utc::now(),
        }
    }
}

/// Builds a coordinator for `config` and runs it to completion
pub async fn run_scrape(config: Config) -> Result<(Vec<EnrichedJob>, RunReport), SiftError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
