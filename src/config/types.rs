use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for Job-Sift
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub output: OutputConfig,

    /// Extra or overriding region → board domain entries
    #[serde(default)]
    pub regions: BTreeMap<String, String>,

    /// Extra or overriding canonical skill → pattern entries
    #[serde(default)]
    pub skills: BTreeMap<String, Vec<String>>,
}

/// Politeness and retry settings for the fetcher
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FetcherConfig {
    /// Pool of User-Agent strings, one picked at random per request
    pub user_agents: Vec<String>,

    pub accept_language: String,

    /// Lower bound of the per-attempt politeness delay (seconds)
    pub delay_min: f64,

    /// Upper bound of the per-attempt politeness delay (seconds)
    pub delay_max: f64,

    pub max_retries: u32,

    /// First backoff step (seconds), doubled per attempt
    pub backoff_base: f64,

    /// Ceiling on a single backoff step (seconds)
    pub backoff_cap: f64,

    /// Per-request socket timeout (seconds)
    pub timeout_secs: u64,

    pub proxy: Option<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agents: vec![crate::crawler::DEFAULT_USER_AGENT.to_string()],
            accept_language: crate::crawler::DEFAULT_ACCEPT_LANGUAGE.to_string(),
            delay_min: 2.0,
            delay_max: 6.0,
            max_retries: 5,
            backoff_base: 1.0,
            backoff_cap: 60.0,
            timeout_secs: 30,
            proxy: None,
        }
    }
}

/// What to search for and how much of it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ScrapeConfig {
    /// Search topics (query keywords)
    pub topics: Vec<String>,

    /// Region names, resolved to board domains through the region table
    pub regions: Vec<String>,

    /// Result pages to walk per (topic, region) pair
    pub pages: u32,

    /// Listings per results page, used to compute the `start` offset
    pub page_size: u32,

    /// Whether to fetch each listing's detail page
    pub fetch_details: bool,

    /// Cap on emitted jobs per (topic, region) pair
    pub max_jobs_per_pair: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            regions: Vec::new(),
            pages: 10,
            page_size: 10,
            fetch_details: false,
            max_jobs_per_pair: 200,
        }
    }
}

/// Skill matching options
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MatchingConfig {
    pub use_fuzzy: bool,
    pub fuzzy_threshold: u8,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            use_fuzzy: false,
            fuzzy_threshold: 90,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputConfig {
    /// Directory the result file is written into
    pub dir: String,

    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
            format: OutputFormat::Csv,
        }
    }
}

/// Persistence backend for enriched jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Sqlite,
}
