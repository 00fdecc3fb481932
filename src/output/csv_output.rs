//! CSV output
//!
//! Writes one timestamped CSV file per run.

use crate::models::EnrichedJob;
use crate::output::traits::{ensure_dir, JobSink, OutputResult, COLUMNS};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// One CSV line; field order matches [`COLUMNS`]
#[derive(Debug, Serialize)]
pub(crate) struct JobRow<'a> {
    pub horizontal: &'a str,
    pub region: &'a str,
    pub job_id: Option<&'a str>,
    pub job_title: Option<&'a str>,
    pub company: Option<&'a str>,
    pub raw_location: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub description: Option<&'a str>,
    pub skills_found: String,
    pub url: Option<&'a str>,
    pub scrape_date: String,
}

impl<'a> From<&'a EnrichedJob> for JobRow<'a> {
    fn from(job: &'a EnrichedJob) -> Self {
        Self {
            horizontal: &job.topic,
            region: &job.region,
            job_id: job.listing.listing_id.as_deref(),
            job_title: job.listing.title.as_deref(),
            company: job.listing.company.as_deref(),
            raw_location: job.listing.raw_location.as_deref(),
            summary: job.listing.summary.as_deref(),
            description: job.detail_text.as_deref(),
            skills_found: job.skills_joined(),
            url: job.listing.url.as_deref(),
            scrape_date: job.retrieved_at.to_rfc3339(),
        }
    }
}

/// Writes jobs to `<dir>/indeed_jobs_<YYYYMMDDTHHMMSSZ>.csv`
pub struct CsvSink {
    dir: PathBuf,
    started_at: DateTime<Utc>,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_timestamp(dir, Utc::now())
    }

    /// Uses `started_at` for the file name instead of the current time
    pub fn with_timestamp(dir: impl Into<PathBuf>, started_at: DateTime<Utc>) -> Self {
        Self {
            dir: dir.into(),
            started_at,
        }
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(format!(
            "indeed_jobs_{}.csv",
            self.started_at.format("%Y%m%dT%H%M%SZ")
        ))
    }
}

impl JobSink for CsvSink {
    fn write_all(&mut self, jobs: &[EnrichedJob]) -> OutputResult<PathBuf> {
        ensure_dir(&self.dir)?;
        let path = self.file_path();

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(COLUMNS)?;
        for job in jobs {
            writer.serialize(JobRow::from(job))?;
        }
        writer.flush()?;

        tracing::info!("Saved {} jobs to {}", jobs.len(), path.display());
        Ok(path)
    }
}
