//! End-to-end scrape tests against a mock job board

use job_sift::config::Config;
use job_sift::crawler::{Coordinator, Fetcher, RecordingPacer};
use job_sift::output::{CsvSink, JobSink, SqliteSink, StopReason};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERP: &str = include_str!("../fixtures/serp_sample.html");
const DETAIL: &str = include_str!("../fixtures/detail_sample.html");
const EMPTY_PAGE: &str = "<html><body><p>No jobs found</p></body></html>";

/// Creates a config pointing the "Testland" region at the mock server
fn create_test_config(board: &str, topics: &[&str]) -> Config {
    let mut config = Config::default();
    config.fetcher.delay_min = 0.0;
    config.fetcher.delay_max = 0.0;
    config.fetcher.max_retries = 2;
    config.fetcher.timeout_secs = 5;
    config.scrape.topics = topics.iter().map(|t| t.to_string()).collect();
    config.scrape.regions = vec!["Testland".to_string()];
    config.scrape.pages = 5;
    config
        .regions
        .insert("Testland".to_string(), board.to_string());
    config
}

fn coordinator(config: Config) -> Coordinator<RecordingPacer> {
    let fetcher = Fetcher::with_pacer(&config.fetcher, RecordingPacer::new())
        .expect("Failed to build fetcher");
    Coordinator::with_fetcher(config, fetcher).expect("Failed to build coordinator")
}

/// Results page with one modern card per key, each linking to its redirect URL
fn serp_page(keys: &[&str]) -> String {
    let cards: String = keys
        .iter()
        .map(|key| {
            format!(
                r#"<div class="job_seen_beacon" data-jk="{key}">
                    <h2 class="jobTitle"><a href="/rc/clk?jk={key}"><span>Job {key}</span></a></h2>
                    <span class="companyName">Company {key}</span>
                </div>"#
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", cards)
}

async fn mount_page(server: &MockServer, start: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("start", start))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pagination_dedup_and_empty_page_stop() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "0", SERP.to_string()).await;
    mount_page(&mock_server, "10", serp_page(&["test123", "test789"])).await;
    mount_page(&mock_server, "20", EMPTY_PAGE.to_string()).await;

    let config = create_test_config(&mock_server.uri(), &["robotics"]);
    let (jobs, report) = coordinator(config).run().await;

    let ids: Vec<Option<&str>> = jobs
        .iter()
        .map(|j| j.listing.listing_id.as_deref())
        .collect();
    assert_eq!(
        ids,
        vec![Some("test123"), Some("test456"), None, Some("test789")]
    );

    assert_eq!(report.pairs.len(), 1);
    let stats = &report.pairs[0];
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(stats.listings_parsed, 5);
    assert_eq!(stats.duplicates_skipped, 1);
    assert_eq!(stats.jobs_emitted, 4);
    assert_eq!(stats.stop_reason, StopReason::EmptyPage);

    let first = &jobs[0];
    assert_eq!(first.topic, "robotics");
    assert_eq!(first.region, "Testland");
    assert_eq!(
        first.listing.url.as_deref(),
        Some(format!("{}/rc/clk?jk=test123", mock_server.uri()).as_str())
    );
    assert!(first.skills.contains("python"));
    assert!(first.skills.contains("ros"));
    assert_eq!(first.detail_text, None);
}

#[tokio::test]
async fn test_search_query_parameters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("q", "controls engineer"))
        .and(query_param("l", "Testland"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["controls engineer"]);
    let (jobs, report) = coordinator(config).run().await;

    assert!(jobs.is_empty());
    assert_eq!(report.pairs[0].pages_fetched, 1);
    assert_eq!(report.pairs[0].stop_reason, StopReason::EmptyPage);
}

#[tokio::test]
async fn test_large_page_size_offsets() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "0", serp_page(&["a1"])).await;
    mount_page(&mock_server, "1000000000", serp_page(&["b2"])).await;
    mount_page(&mock_server, "2000000000", serp_page(&["c3"])).await;

    let mut config = create_test_config(&mock_server.uri(), &["robotics"]);
    config.scrape.pages = 3;
    config.scrape.page_size = 1_000_000_000;
    let (jobs, report) = coordinator(config).run().await;

    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[2].listing.listing_id.as_deref(), Some("c3"));
    assert_eq!(report.pairs[0].pages_fetched, 3);
}

#[tokio::test]
async fn test_cap_stops_pair_early() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(serp_page(&["a", "b", "c"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(serp_page(&["d"])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), &["robotics"]);
    config.scrape.max_jobs_per_pair = 2;
    let (jobs, report) = coordinator(config).run().await;

    assert_eq!(jobs.len(), 2);
    assert_eq!(report.pairs[0].stop_reason, StopReason::CapReached);
    assert_eq!(report.pairs[0].pages_fetched, 1);
}

#[tokio::test]
async fn test_serp_failure_ends_only_its_pair() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("q", "broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("q", "robotics"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(serp_page(&["k1"])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("q", "robotics"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_PAGE))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["broken", "robotics"]);
    let (jobs, report) = coordinator(config).run().await;

    assert_eq!(report.pairs.len(), 2);
    assert_eq!(report.pairs[0].stop_reason, StopReason::FetchFailed);
    assert_eq!(report.pairs[0].pages_fetched, 0);
    assert_eq!(report.pairs[1].jobs_emitted, 1);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].topic, "robotics");
}

#[tokio::test]
async fn test_detail_enrichment_and_failure() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "0", serp_page(&["good", "bad"])).await;
    mount_page(&mock_server, "10", EMPTY_PAGE.to_string()).await;
    Mock::given(method("GET"))
        .and(path("/rc/clk"))
        .and(query_param("jk", "good"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rc/clk"))
        .and(query_param("jk", "bad"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), &["robotics"]);
    config.scrape.fetch_details = true;
    let (jobs, report) = coordinator(config).run().await;

    assert_eq!(jobs.len(), 2);
    let good = &jobs[0];
    assert!(good
        .detail_text
        .as_deref()
        .is_some_and(|t| t.contains("Strong C++ skills")));
    let skills: Vec<&str> = good.skills.iter().map(String::as_str).collect();
    assert_eq!(skills, vec!["c++", "gazebo", "matlab", "simulink"]);

    // A failed detail fetch keeps the listing without description
    let bad = &jobs[1];
    assert_eq!(bad.detail_text, None);
    assert!(bad.skills.is_empty());
    assert_eq!(report.pairs[0].detail_failures, 1);
}

#[tokio::test]
async fn test_scraped_jobs_persist() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "0", SERP.to_string()).await;
    mount_page(&mock_server, "10", EMPTY_PAGE.to_string()).await;

    let config = create_test_config(&mock_server.uri(), &["robotics"]);
    let (jobs, _report) = coordinator(config).run().await;
    let dir = TempDir::new().unwrap();

    let csv_path = CsvSink::new(dir.path()).write_all(&jobs).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    assert_eq!(reader.records().count(), 3);

    let db_path = SqliteSink::new(dir.path(), "hash").write_all(&jobs).unwrap();
    let conn = rusqlite::Connection::open(db_path).unwrap();
    let skills: String = conn
        .query_row(
            "SELECT skills_found FROM jobs WHERE job_id = 'test456'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(skills, "integration;plc;scada");
}
