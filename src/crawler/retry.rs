//! Retry policy and pacing
//!
//! This module owns the timing rules of the fetcher:
//! - A randomized politeness delay before every attempt
//! - Exponential backoff with additive jitter after a rate-limit response
//! - Exponential backoff without jitter after a transport failure
//!
//! Waiting itself goes through the [`Pacer`] trait so the sleep sequence can
//! be observed without actually sleeping.

use crate::config::FetcherConfig;
use crate::ConfigError;
use rand::Rng;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shortest politeness delay ever slept, whatever the jitter says (seconds)
const MIN_POLITENESS_DELAY: f64 = 0.1;

/// Half-width of the uniform jitter applied to the politeness delay (seconds)
const POLITENESS_JITTER: f64 = 0.5;

/// Timing rules for one fetcher
///
/// Invariants, enforced at construction: `min_delay <= max_delay`,
/// `backoff_cap >= backoff_base > 0`, `max_retries >= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    min_delay: f64,
    max_delay: f64,
    max_retries: u32,
    backoff_base: f64,
    backoff_cap: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_delay: 2.0,
            max_delay: 6.0,
            max_retries: 5,
            backoff_base: 1.0,
            backoff_cap: 60.0,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy, rejecting values that break its invariants
    ///
    /// All durations are in seconds.
    pub fn new(
        min_delay: f64,
        max_delay: f64,
        max_retries: u32,
        backoff_base: f64,
        backoff_cap: f64,
    ) -> Result<Self, ConfigError> {
        if !min_delay.is_finite() || !max_delay.is_finite() || min_delay < 0.0 {
            return Err(ConfigError::Validation(format!(
                "delay bounds must be finite and non-negative, got {}..{}",
                min_delay, max_delay
            )));
        }

        if min_delay > max_delay {
            return Err(ConfigError::Validation(format!(
                "delay-min ({}) must not exceed delay-max ({})",
                min_delay, max_delay
            )));
        }

        if max_retries < 1 {
            return Err(ConfigError::Validation(
                "max-retries must be >= 1".to_string(),
            ));
        }

        if !(backoff_base > 0.0) || !backoff_cap.is_finite() {
            return Err(ConfigError::Validation(format!(
                "backoff-base must be > 0, got {}",
                backoff_base
            )));
        }

        if backoff_cap < backoff_base {
            return Err(ConfigError::Validation(format!(
                "backoff-cap ({}) must be >= backoff-base ({})",
                backoff_cap, backoff_base
            )));
        }

        Ok(Self {
            min_delay,
            max_delay,
            max_retries,
            backoff_base,
            backoff_cap,
        })
    }

    /// Builds the policy described by the fetcher section of the config
    pub fn from_config(config: &FetcherConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.delay_min,
            config.delay_max,
            config.max_retries,
            config.backoff_base,
            config.backoff_cap,
        )
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay slept before every attempt, including the first
    ///
    /// Uniform in `[min_delay, max_delay]`, shifted by uniform jitter in
    /// `[-0.5, +0.5]`, floored at 0.1 s.
    pub fn politeness_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let base = rng.gen_range(self.min_delay..=self.max_delay);
        let jitter = rng.gen_range(-POLITENESS_JITTER..=POLITENESS_JITTER);
        Duration::from_secs_f64((base + jitter).max(MIN_POLITENESS_DELAY))
    }

    /// Backoff after a 429/503 response: capped exponential step plus `U(0, 1)`
    pub fn rate_limit_backoff<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let jitter: f64 = rng.gen();
        Duration::from_secs_f64(self.exponential_step(attempt) + jitter)
    }

    /// Backoff after a transport failure: capped exponential step, no jitter
    pub fn transport_backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs_f64(self.exponential_step(attempt))
    }

    /// `min(backoff_cap, backoff_base * 2^(attempt - 1))`, attempts counted from 1
    fn exponential_step(&self, attempt: u32) -> f64 {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        (self.backoff_base * 2f64.powi(exponent)).min(self.backoff_cap)
    }
}

/// Something that can wait for a given duration
pub trait Pacer: Send + Sync {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Pacer backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Pacer that records requested pauses and returns immediately
///
/// Clones share the same log, so a test can keep one handle while the
/// fetcher owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All pauses requested so far, in order
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        if let Ok(mut pauses) = self.pauses.lock() {
            pauses.push(duration);
        }
    }
}
