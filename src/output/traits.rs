//! Output sink trait and errors
//!
//! A sink receives every enriched job of a run in one call, at the end of the
//! run, and reports where it wrote them.

use crate::models::EnrichedJob;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Column names shared by every tabular sink, in order
pub const COLUMNS: [&str; 11] = [
    "horizontal",
    "region",
    "job_id",
    "job_title",
    "company",
    "raw_location",
    "summary",
    "description",
    "skills_found",
    "url",
    "scrape_date",
];

/// Destination for the jobs of a run
pub trait JobSink {
    /// Writes all jobs and returns the path of the written file
    fn write_all(&mut self, jobs: &[EnrichedJob]) -> OutputResult<PathBuf>;
}

/// Creates the output directory if it does not exist yet
pub(crate) fn ensure_dir(dir: &Path) -> OutputResult<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
