//! Configuration module for Job-Sift
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use job_sift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config/config.toml")).unwrap();
//! println!("Pages per pair: {}", config.scrape.pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, MatchingConfig, OutputConfig, OutputFormat, ScrapeConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
