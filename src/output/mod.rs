//! Output module for persisting enriched jobs and reporting on a run
//!
//! This module handles:
//! - Writing jobs to CSV or SQLite at the end of a run
//! - Per-pair run statistics and their console summary

mod csv_output;
mod schema;
mod sqlite_output;
pub mod stats;
mod traits;

pub use csv_output::CsvSink;
pub use sqlite_output::{SqliteSink, DATABASE_FILE};
pub use stats::{print_report, PairStatistics, RunReport, StopReason};
pub use traits::{JobSink, OutputError, OutputResult, COLUMNS};

use crate::config::{OutputConfig, OutputFormat};

/// Opens the sink selected by the output configuration
///
/// # Arguments
///
/// * `config` - The output configuration
/// * `config_hash` - Hash of the configuration file, recorded by SQLite runs
pub fn open_sink(config: &OutputConfig, config_hash: &str) -> Box<dyn JobSink> {
    match config.format {
        OutputFormat::Csv => Box::new(CsvSink::new(&config.dir)),
        OutputFormat::Sqlite => Box::new(SqliteSink::new(&config.dir, config_hash)),
    }
}
