use crate::config::types::{Config, FetcherConfig, MatchingConfig, ScrapeConfig};
use crate::crawler::RetryPolicy;
use crate::ConfigError;
use regex::Regex;
use std::collections::BTreeMap;
use url::Url;

/// Validates the entire configuration, including the required search lists
///
/// Call this after command-line overrides have been applied; it is the last
/// gate before any network activity.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_required_lists(&config.scrape)?;
    validate_settings(config)
}

/// Validates everything except the presence of topics and regions
pub(crate) fn validate_settings(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_scrape_config(&config.scrape)?;
    validate_matching_config(&config.matching)?;
    validate_output_config(&config.output)?;
    validate_region_domains(&config.regions)?;
    validate_skill_patterns(&config.skills)?;
    Ok(())
}

/// Topics and regions must both be non-empty
fn validate_required_lists(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.topics.iter().all(|t| t.trim().is_empty()) {
        return Err(ConfigError::Missing("scrape.topics".to_string()));
    }

    if config.regions.iter().all(|r| r.trim().is_empty()) {
        return Err(ConfigError::Missing("scrape.regions".to_string()));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    RetryPolicy::from_config(config)?;

    if config.user_agents.iter().any(|ua| ua.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "user-agents cannot contain empty entries".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if let Some(proxy) = &config.proxy {
        Url::parse(proxy)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy '{}': {}", proxy, e)))?;
    }

    Ok(())
}

/// Validates pagination and caps
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.pages < 1 {
        return Err(ConfigError::Validation(format!(
            "pages must be >= 1, got {}",
            config.pages
        )));
    }

    if config.page_size < 1 {
        return Err(ConfigError::Validation(format!(
            "page-size must be >= 1, got {}",
            config.page_size
        )));
    }

    if config.pages.checked_mul(config.page_size).is_none() {
        return Err(ConfigError::Validation(format!(
            "pages ({}) times page-size ({}) overflows the result offset",
            config.pages, config.page_size
        )));
    }

    if config.max_jobs_per_pair < 1 {
        return Err(ConfigError::Validation(format!(
            "max-jobs-per-pair must be >= 1, got {}",
            config.max_jobs_per_pair
        )));
    }

    Ok(())
}

fn validate_matching_config(config: &MatchingConfig) -> Result<(), ConfigError> {
    if config.fuzzy_threshold > 100 {
        return Err(ConfigError::Validation(format!(
            "fuzzy-threshold must be between 0 and 100, got {}",
            config.fuzzy_threshold
        )));
    }
    Ok(())
}

fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.dir.is_empty() {
        return Err(ConfigError::Validation(
            "output dir cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Region domains must be absolute http(s) URLs
fn validate_region_domains(regions: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    for (region, domain) in regions {
        let url = Url::parse(domain).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid domain for region '{}': {}", region, e))
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::Validation(format!(
                "Domain for region '{}' must use http or https, got '{}'",
                region, domain
            )));
        }
    }
    Ok(())
}

/// Every configured skill needs at least one compilable pattern
fn validate_skill_patterns(skills: &BTreeMap<String, Vec<String>>) -> Result<(), ConfigError> {
    for (skill, patterns) in skills {
        if skill.trim().is_empty() {
            return Err(ConfigError::Validation(
                "skill names cannot be empty".to_string(),
            ));
        }

        if patterns.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Skill '{}' must have at least one pattern",
                skill
            )));
        }

        for pattern in patterns {
            Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                skill: skill.clone(),
                source,
            })?;
        }
    }
    Ok(())
}
