//! Crawler module for fetching and harvesting job listings
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with politeness delays and retry/backoff
//! - The pacing seam used to sleep (or record sleeps in tests)
//! - Overall (topic, region) coordination

mod coordinator;
mod fetcher;
mod retry;

pub use coordinator::{run_scrape, Coordinator, PlannedPair};
pub use fetcher::{
    build_http_client, FetchRequest, Fetcher, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT,
};
pub use retry::{Pacer, RecordingPacer, RetryPolicy, TokioPacer};
