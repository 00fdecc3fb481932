//! Database schema for the SQLite output
//!
//! Each run gets one row in `runs`; its jobs reference it by `run_id`.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per harvesting run
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    job_count INTEGER NOT NULL DEFAULT 0
);

-- Enriched jobs, columns mirror the CSV output
CREATE TABLE IF NOT EXISTS jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    horizontal TEXT NOT NULL,
    region TEXT NOT NULL,
    job_id TEXT,
    job_title TEXT,
    company TEXT,
    raw_location TEXT,
    summary TEXT,
    description TEXT,
    skills_found TEXT NOT NULL,
    url TEXT,
    scrape_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_jobs_run ON jobs(run_id);
CREATE INDEX IF NOT EXISTS idx_jobs_job_id ON jobs(job_id);
"#;

/// Initializes the database schema
///
/// Safe to call on an existing database; every statement is `IF NOT EXISTS`.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
