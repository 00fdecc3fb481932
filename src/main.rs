//! Job-Sift main entry point
//!
//! This is the command-line interface for the Job-Sift listing harvester.

use anyhow::{Context, Result};
use clap::Parser;
use job_sift::config::{load_config_with_hash, validate, Config, OutputFormat};
use job_sift::crawler::Coordinator;
use job_sift::output::{open_sink, print_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Job-Sift: a polite job-listing harvester
///
/// Job-Sift walks the search-results pages of a job board for every
/// (topic, region) pair, tags each listing with the skills it mentions and
/// writes the enriched jobs to CSV or SQLite.
#[derive(Parser, Debug)]
#[command(name = "job-sift")]
#[command(version = "1.0.0")]
#[command(about = "A polite job-listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG", default_value = "config/config.toml")]
    config: PathBuf,

    /// Search topics, replacing the configured list
    #[arg(long, num_args = 1..)]
    topics: Option<Vec<String>>,

    /// Regions, replacing the configured list
    #[arg(long, num_args = 1..)]
    regions: Option<Vec<String>>,

    /// Results pages to walk per (topic, region) pair
    #[arg(long)]
    pages: Option<u32>,

    /// Fetch each listing's detail page
    #[arg(long)]
    fetch_details: bool,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without any network access
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(topics) = &self.topics {
            config.scrape.topics = topics.clone();
        }
        if let Some(regions) = &self.regions {
            config.scrape.regions = regions.clone();
        }
        if let Some(pages) = self.pages {
            config.scrape.pages = pages;
        }
        if self.fetch_details {
            config.scrape.fetch_details = true;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e)
                .with_context(|| format!("loading {}", cli.config.display()));
        }
    };

    cli.apply_overrides(&mut config);
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    let coordinator = Coordinator::new(config).context("setting up the scraper")?;

    if cli.dry_run {
        handle_dry_run(&coordinator);
    } else {
        handle_scrape(&coordinator, &config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("job_sift=info,warn"),
            1 => EnvFilter::new("job_sift=debug,info"),
            2 => EnvFilter::new("job_sift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(coordinator: &Coordinator) {
    let config = coordinator.config();
    println!("=== Job-Sift Dry Run ===\n");

    println!("Fetcher:");
    println!(
        "  Delay: {:.1}-{:.1}s per attempt",
        config.fetcher.delay_min, config.fetcher.delay_max
    );
    println!("  Max retries: {}", config.fetcher.max_retries);
    println!(
        "  Backoff: base {:.1}s, cap {:.1}s",
        config.fetcher.backoff_base, config.fetcher.backoff_cap
    );
    println!("  User agents: {}", config.fetcher.user_agents.len());
    if let Some(proxy) = &config.fetcher.proxy {
        println!("  Proxy: {}", proxy);
    }

    println!("\nScrape:");
    println!("  Pages per pair: {}", config.scrape.pages);
    println!("  Page size: {}", config.scrape.page_size);
    println!("  Fetch details: {}", config.scrape.fetch_details);
    println!("  Max jobs per pair: {}", config.scrape.max_jobs_per_pair);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.dir);
    println!("  Format: {:?}", config.output.format);

    let plan = coordinator.plan();
    println!("\nPairs ({}):", plan.len());
    for pair in &plan {
        println!("  - '{}' in {}: {}", pair.topic, pair.region, pair.search_url);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would request at most {} results pages",
        plan.len() as u64 * u64::from(config.scrape.pages)
    );
}

/// Handles the main scrape operation
async fn handle_scrape(coordinator: &Coordinator, config_hash: &str) -> Result<()> {
    let config = coordinator.config();
    tracing::info!(
        "Topics: {}, Regions: {}, Pages: {}",
        config.scrape.topics.len(),
        config.scrape.regions.len(),
        config.scrape.pages
    );

    let (jobs, report) = coordinator.run().await;

    let mut sink = open_sink(&config.output, config_hash);
    match sink.write_all(&jobs) {
        Ok(path) => tracing::info!("Output written to {}", path.display()),
        Err(e) => {
            tracing::error!("Failed to write output: {}", e);
            return Err(e).context("writing output");
        }
    }

    print_report(&report);
    Ok(())
}
