//! Integration tests for Job-Sift
//!
//! These tests use wiremock to stand in for the job board and HTML fixtures
//! under `tests/fixtures/` for the parsers.

mod fetch_tests;
mod parse_tests;
mod scrape_tests;
