//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with the configured timeout and proxy
//! - Resolving User-Agent and Accept-Language headers per request
//! - The politeness delay before every attempt
//! - Retry logic for rate limiting and transport failures
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 200 | Return body |
//! | HTTP 429 / 503 | Back off (with jitter), retry |
//! | Any other status | Return body as-is |
//! | Transport error | Back off (no jitter), retry |
//! | Attempts exhausted | Last transport error, else `Exhausted` |

use crate::config::FetcherConfig;
use crate::crawler::retry::{Pacer, RetryPolicy, TokioPacer};
use crate::{FetchError, SiftError};
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// User-Agent used when the configured pool is empty
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; Bot/0.1)";

/// Accept-Language used when neither the request nor the config sets one
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Redirect hops followed before reqwest gives up
const MAX_REDIRECTS: usize = 10;

/// A single GET request, built per call and consumed by [`Fetcher::fetch`]
#[derive(Debug, Clone)]
pub struct FetchRequest {
    url: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    follow_redirects: bool,
}

impl FetchRequest {
    /// Starts a GET request that follows redirects
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            follow_redirects: true,
        }
    }

    /// Adds a header; names are case-insensitive
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a query parameter, URL-encoded when the request is sent
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Builds the header map, injecting a User-Agent and Accept-Language
    /// when the caller did not supply them
    fn resolve_headers(
        &self,
        user_agents: &[String],
        accept_language: &str,
    ) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FetchError::InvalidRequest(format!("header '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| FetchError::InvalidRequest(format!("header '{}': {}", name, e)))?;
            headers.insert(name, value);
        }

        if !headers.contains_key(USER_AGENT) {
            let agent = user_agents
                .choose(&mut rand::thread_rng())
                .map(String::as_str)
                .unwrap_or(DEFAULT_USER_AGENT);
            let value = HeaderValue::from_str(agent)
                .map_err(|e| FetchError::InvalidRequest(format!("user agent: {}", e)))?;
            headers.insert(USER_AGENT, value);
        }

        if !headers.contains_key(ACCEPT_LANGUAGE) {
            let value = HeaderValue::from_str(accept_language)
                .map_err(|e| FetchError::InvalidRequest(format!("accept-language: {}", e)))?;
            headers.insert(ACCEPT_LANGUAGE, value);
        }

        Ok(headers)
    }
}

/// Outcome of one network attempt that got a response
enum Attempt {
    Success(String),
    RateLimited(StatusCode),
    Unexpected(StatusCode, String),
}

/// Builds an HTTP client with the configured timeout, proxy and redirect policy
///
/// # Arguments
///
/// * `config` - The fetcher configuration
/// * `follow_redirects` - Whether the client follows redirects
///
/// # Example
///
/// ```no_run
/// use job_sift::config::FetcherConfig;
/// use job_sift::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default(), true).unwrap();
/// ```
pub fn build_http_client(
    config: &FetcherConfig,
    follow_redirects: bool,
) -> Result<Client, reqwest::Error> {
    let redirect = if follow_redirects {
        Policy::limited(MAX_REDIRECTS)
    } else {
        Policy::none()
    };

    let mut builder = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(redirect)
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
    }

    builder.build()
}

/// Rate-limited, retrying GET client
///
/// Holds one connection pool per redirect mode; both are reused across calls.
pub struct Fetcher<P: Pacer = TokioPacer> {
    client: Client,
    no_redirect_client: Client,
    policy: RetryPolicy,
    user_agents: Vec<String>,
    accept_language: String,
    pacer: P,
}

impl Fetcher<TokioPacer> {
    /// Creates a fetcher that sleeps on the tokio timer
    pub fn new(config: &FetcherConfig) -> Result<Self, SiftError> {
        Self::with_pacer(config, TokioPacer)
    }
}

impl<P: Pacer> Fetcher<P> {
    /// Creates a fetcher with a custom pacer
    pub fn with_pacer(config: &FetcherConfig, pacer: P) -> Result<Self, SiftError> {
        let policy = RetryPolicy::from_config(config)?;
        let accept_language = if config.accept_language.trim().is_empty() {
            DEFAULT_ACCEPT_LANGUAGE.to_string()
        } else {
            config.accept_language.clone()
        };

        Ok(Self {
            client: build_http_client(config, true)?,
            no_redirect_client: build_http_client(config, false)?,
            policy,
            user_agents: config.user_agents.clone(),
            accept_language,
            pacer,
        })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches a URL with default headers and redirects followed
    pub async fn fetch_url(&self, url: &str) -> Result<String, FetchError> {
        self.fetch(&FetchRequest::get(url)).await
    }

    /// Fetches a page, retrying rate limits and transport failures
    ///
    /// Every attempt is preceded by the politeness delay. A 200 returns its
    /// body at once; any status other than 200/429/503 also returns its body,
    /// leaving validation to the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Body of the first 200 or non-retryable response
    /// * `Err(FetchError::Transport)` - Retries exhausted, last transport error
    /// * `Err(FetchError::Exhausted)` - Retries exhausted on 429/503 only
    /// * `Err(FetchError::InvalidRequest)` - Bad URL or header, nothing sent
    pub async fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError> {
        let url = Url::parse(request.url())
            .map_err(|e| FetchError::InvalidRequest(format!("url '{}': {}", request.url(), e)))?;
        let headers = request.resolve_headers(&self.user_agents, &self.accept_language)?;
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };

        let max_retries = self.policy.max_retries();
        let mut last_error: Option<reqwest::Error> = None;
        let mut last_status: Option<StatusCode> = None;

        for attempt in 1..=max_retries {
            let delay = self.policy.politeness_delay(&mut rand::thread_rng());
            tracing::debug!("Sleeping for {:.2}s before {}", delay.as_secs_f64(), url);
            self.pacer.pause(delay).await;

            match send(client, &url, &headers, request.query_pairs()).await {
                Ok(Attempt::Success(body)) => return Ok(body),

                Ok(Attempt::RateLimited(status)) => {
                    tracing::warn!(
                        "Rate limited (status {}) on {}. Backing off (attempt {}).",
                        status.as_u16(),
                        url,
                        attempt
                    );
                    last_status = Some(status);
                    let backoff = self
                        .policy
                        .rate_limit_backoff(attempt, &mut rand::thread_rng());
                    self.pacer.pause(backoff).await;
                }

                Ok(Attempt::Unexpected(status, body)) => {
                    tracing::warn!("Unexpected status {} for {}", status.as_u16(), url);
                    return Ok(body);
                }

                Err(e) => {
                    tracing::warn!("Error fetching {} (attempt {}): {}", url, attempt, e);
                    last_error = Some(e);
                    self.pacer.pause(self.policy.transport_backoff(attempt)).await;
                }
            }
        }

        match last_error {
            Some(source) => Err(FetchError::Transport {
                url: url.to_string(),
                attempts: max_retries,
                source,
            }),
            None => Err(FetchError::Exhausted {
                url: url.to_string(),
                attempts: max_retries,
                last_status: last_status.map(|s| s.as_u16()).unwrap_or_default(),
            }),
        }
    }
}

/// Performs one GET and classifies the response
async fn send(
    client: &Client,
    url: &Url,
    headers: &HeaderMap,
    query: &[(String, String)],
) -> Result<Attempt, reqwest::Error> {
    let response = client
        .get(url.clone())
        .headers(headers.clone())
        .query(query)
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::OK {
        return Ok(Attempt::Success(response.text().await?));
    }

    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
        return Ok(Attempt::RateLimited(status));
    }

    Ok(Attempt::Unexpected(status, response.text().await?))
}
