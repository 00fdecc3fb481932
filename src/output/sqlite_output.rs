//! SQLite output
//!
//! Appends each run and its jobs to `<dir>/indeed_jobs.db`, so successive
//! runs accumulate in one database.

use crate::models::EnrichedJob;
use crate::output::csv_output::JobRow;
use crate::output::schema::initialize_schema;
use crate::output::traits::{ensure_dir, JobSink, OutputResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::PathBuf;

/// File name of the database inside the output directory
pub const DATABASE_FILE: &str = "indeed_jobs.db";

/// Writes jobs into a SQLite database
pub struct SqliteSink {
    dir: PathBuf,
    config_hash: String,
}

impl SqliteSink {
    /// Creates a sink writing under `dir`, tagging the run with `config_hash`
    pub fn new(dir: impl Into<PathBuf>, config_hash: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            config_hash: config_hash.into(),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.dir.join(DATABASE_FILE)
    }

    fn open(&self) -> OutputResult<Connection> {
        ensure_dir(&self.dir)?;
        let conn = Connection::open(self.database_path())?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;
        initialize_schema(&conn)?;
        Ok(conn)
    }
}

impl JobSink for SqliteSink {
    fn write_all(&mut self, jobs: &[EnrichedJob]) -> OutputResult<PathBuf> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO runs (started_at, config_hash, job_count) VALUES (?1, ?2, ?3)",
            params![Utc::now().to_rfc3339(), self.config_hash, jobs.len() as i64],
        )?;
        let run_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO jobs (run_id, horizontal, region, job_id, job_title, company,
                    raw_location, summary, description, skills_found, url, scrape_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;

            for job in jobs {
                let row = JobRow::from(job);
                stmt.execute(params![
                    run_id,
                    row.horizontal,
                    row.region,
                    row.job_id,
                    row.job_title,
                    row.company,
                    row.raw_location,
                    row.summary,
                    row.description,
                    row.skills_found,
                    row.url,
                    row.scrape_date,
                ])?;
            }
        }

        tx.commit()?;

        let path = self.database_path();
        tracing::info!("Saved {} jobs to {} (run {})", jobs.len(), path.display(), run_id);
        Ok(path)
    }
}
