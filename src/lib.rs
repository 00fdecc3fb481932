//! Job-Sift: a polite job-listing harvester
//!
//! This crate fetches search-results pages from a job board, extracts listing
//! records from drifting markup, tags them against a skill taxonomy and
//! persists the enriched jobs.

pub mod config;
pub mod crawler;
pub mod models;
pub mod output;
pub mod parser;
pub mod skills;
pub mod url;

use thiserror::Error;

/// Main error type for Job-Sift operations
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required setting: {0}")]
    Missing(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid skill pattern for '{skill}': {source}")]
    InvalidPattern { skill: String, source: regex::Error },
}

/// Errors surfaced by the fetcher once its retry budget is spent
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed after {attempts} attempts: {source}")]
    Transport {
        url: String,
        attempts: u32,
        source: reqwest::Error,
    },

    #[error("Failed to fetch {url}: still rate limited (HTTP {last_status}) after {attempts} attempts")]
    Exhausted {
        url: String,
        attempts: u32,
        last_status: u16,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type alias for Job-Sift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, FetchRequest, Fetcher, RetryPolicy};
pub use models::{EnrichedJob, ListingRecord};
pub use parser::{parse_detail, parse_listings};
pub use skills::{SkillMatcher, SkillTaxonomy};
pub use url::RegionTable;
