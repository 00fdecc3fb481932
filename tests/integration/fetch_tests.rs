//! Fetcher retry and backoff behavior against a mock server

use job_sift::config::FetcherConfig;
use job_sift::crawler::{FetchRequest, Fetcher, RecordingPacer};
use job_sift::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fast policy: three attempts, unit backoff base
fn test_fetcher_config() -> FetcherConfig {
    FetcherConfig {
        user_agents: vec!["TestAgent/1.0".to_string()],
        delay_min: 0.0,
        delay_max: 0.0,
        max_retries: 3,
        backoff_base: 1.0,
        backoff_cap: 60.0,
        timeout_secs: 5,
        ..Default::default()
    }
}

fn fetcher() -> (Fetcher<RecordingPacer>, RecordingPacer) {
    let pacer = RecordingPacer::new();
    let fetcher = Fetcher::with_pacer(&test_fetcher_config(), pacer.clone())
        .expect("Failed to build fetcher");
    (fetcher, pacer)
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (fetcher, pacer) = fetcher();
    let body = fetcher
        .fetch_url(&format!("{}/jobs", mock_server.uri()))
        .await
        .expect("Fetch should succeed");

    assert_eq!(body, "<html>ok</html>");

    // Only the politeness delay: zero base plus jitter, floored at 0.1s
    let pauses = pacer.pauses();
    assert_eq!(pauses.len(), 1);
    assert!((0.1..=0.5).contains(&pauses[0].as_secs_f64()));
}

#[tokio::test]
async fn test_rate_limit_then_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
        .mount(&mock_server)
        .await;

    let (fetcher, pacer) = fetcher();
    let body = fetcher
        .fetch_url(&format!("{}/jobs", mock_server.uri()))
        .await
        .expect("Fetch should succeed after backing off");
    assert_eq!(body, "finally");

    // politeness, backoff 1, politeness, backoff 2, politeness
    let pauses = pacer.pauses();
    assert_eq!(pauses.len(), 5);
    let first_backoff = pauses[1].as_secs_f64();
    let second_backoff = pauses[3].as_secs_f64();
    assert!((1.0..=2.0).contains(&first_backoff), "got {}", first_backoff);
    assert!((2.0..=3.0).contains(&second_backoff), "got {}", second_backoff);
}

#[tokio::test]
async fn test_persistent_rate_limit_exhausts_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let (fetcher, pacer) = fetcher();
    let result = fetcher.fetch_url(&mock_server.uri()).await;

    match result {
        Err(FetchError::Exhausted {
            attempts,
            last_status,
            ..
        }) => {
            assert_eq!(attempts, 3);
            assert_eq!(last_status, 503);
        }
        other => panic!("Expected Exhausted, got {:?}", other),
    }
    assert_eq!(pacer.pauses().len(), 6);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let (fetcher, pacer) = fetcher();
    let result = fetcher.fetch_url("http://127.0.0.1:1/jobs").await;

    assert!(
        matches!(result, Err(FetchError::Transport { attempts: 3, .. })),
        "Expected Transport error, got {:?}",
        result
    );

    // Transport backoff has no jitter
    let pauses = pacer.pauses();
    assert_eq!(pauses.len(), 6);
    assert_eq!(pauses[1], Duration::from_secs(1));
    assert_eq!(pauses[3], Duration::from_secs(2));
    assert_eq!(pauses[5], Duration::from_secs(4));
}

#[tokio::test]
async fn test_other_status_returns_body_without_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (fetcher, pacer) = fetcher();
    let body = fetcher
        .fetch_url(&format!("{}/viewjob", mock_server.uri()))
        .await
        .expect("Non-retryable status should return its body");

    assert_eq!(body, "not here");
    assert_eq!(pacer.pauses().len(), 1);
}

#[tokio::test]
async fn test_query_and_default_headers_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("q", "robotics engineer"))
        .and(query_param("l", "United States"))
        .and(query_param("start", "20"))
        .and(header("user-agent", "TestAgent/1.0"))
        .and(header("accept-language", "en-US,en;q=0.9"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("matched"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (fetcher, _pacer) = fetcher();
    let request = FetchRequest::get(format!("{}/jobs", mock_server.uri()))
        .query("q", "robotics engineer")
        .query("l", "United States")
        .query("start", 20)
        .header("X-Trace", "abc");

    let body = fetcher.fetch(&request).await.expect("Fetch should succeed");
    assert_eq!(body, "matched");
}

#[tokio::test]
async fn test_redirect_modes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", "/new")
                .set_body_string("moved"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("landed"))
        .mount(&mock_server)
        .await;

    let (fetcher, _pacer) = fetcher();
    let url = format!("{}/old", mock_server.uri());

    let followed = fetcher.fetch(&FetchRequest::get(&url)).await.unwrap();
    assert_eq!(followed, "landed");

    let not_followed = fetcher
        .fetch(&FetchRequest::get(&url).follow_redirects(false))
        .await
        .unwrap();
    assert_eq!(not_followed, "moved");
}
