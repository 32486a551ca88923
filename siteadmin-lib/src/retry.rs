//! Retry policy for transient request failures.

use std::time::Duration;

use reqwest::Method;

use crate::error::ApiError;

/// Whether a request can be sent again when its outcome is unknown.
///
/// A 5xx, timeout or dropped connection may arrive after the backend already
/// applied a write. Only requests that leave the same state when repeated are
/// replayed in that case; everything else is retried on 429 alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idempotency {
    Idempotent,
    NonIdempotent,
}

impl Idempotency {
    /// `GET`, `HEAD`, `PUT` and `DELETE` are idempotent; `POST` and `PATCH` are not.
    pub fn of(method: &Method) -> Self {
        if matches!(
            *method,
            Method::GET | Method::HEAD | Method::PUT | Method::DELETE
        ) {
            Self::Idempotent
        } else {
            Self::NonIdempotent
        }
    }
}

/// Configuration for automatic retry behavior.
///
/// Rate limiting (429), server errors (5xx) and network failures are
/// considered transient. Everything else fails on the first attempt.
/// Non-idempotent requests are only retried on 429, which the backend
/// answers before doing any work.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use siteadmin_lib::RetryConfig;
///
/// let custom = RetryConfig::default()
///     .max_retries(5)
///     .initial_delay(Duration::from_millis(200));
///
/// let none = RetryConfig::no_retry();
/// assert_eq!(none.max_retries, 0);
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first request.
    pub max_retries: u32,
    /// Delay before the first retry (doubles each attempt).
    pub initial_delay: Duration,
    /// Upper bound on the delay between retries.
    pub max_delay: Duration,
    /// Retry on HTTP 429.
    pub retry_on_429: bool,
    /// Retry on HTTP 5xx.
    pub retry_on_5xx: bool,
    /// Retry on connection and timeout errors.
    pub retry_on_network: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            retry_on_429: true,
            retry_on_5xx: true,
            retry_on_network: true,
        }
    }
}

impl RetryConfig {
    /// Creates a config with all retries disabled.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            retry_on_429: false,
            retry_on_5xx: false,
            retry_on_network: false,
            ..Default::default()
        }
    }

    /// Sets the maximum number of retries.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Sets the initial delay between retries.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Whether `error` should be retried after `attempts` retries already made.
    pub fn should_retry(&self, error: &ApiError, attempts: u32, idempotency: Idempotency) -> bool {
        if attempts >= self.max_retries {
            return false;
        }
        match error {
            ApiError::Http { status: 429, .. } => self.retry_on_429,
            _ if idempotency == Idempotency::NonIdempotent => false,
            ApiError::Http { status, .. } => *status >= 500 && self.retry_on_5xx,
            ApiError::Network(_) | ApiError::Timeout(_) => self.retry_on_network,
            _ => false,
        }
    }

    /// The delay to use after `delay`, doubling up to `max_delay`.
    pub fn next_delay(&self, delay: Duration) -> Duration {
        (delay * 2).min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::http(status, "boom")
    }

    const SAFE: Idempotency = Idempotency::Idempotent;
    const UNSAFE: Idempotency = Idempotency::NonIdempotent;

    #[test]
    fn test_transient_statuses_are_retried() {
        let config = RetryConfig::default();
        assert!(config.should_retry(&http(429), 0, SAFE));
        assert!(config.should_retry(&http(503), 2, SAFE));
        assert!(!config.should_retry(&http(503), 3, SAFE));
        assert!(!config.should_retry(&http(404), 0, SAFE));
        assert!(config.should_retry(&ApiError::Timeout(Duration::from_secs(1)), 0, SAFE));
    }

    #[test]
    fn test_non_idempotent_only_retries_rate_limits() {
        let config = RetryConfig::default();
        assert!(config.should_retry(&http(429), 0, UNSAFE));
        assert!(!config.should_retry(&http(502), 0, UNSAFE));
        assert!(!config.should_retry(&ApiError::Timeout(Duration::from_secs(1)), 0, UNSAFE));
    }

    #[test]
    fn test_idempotency_of_methods() {
        assert_eq!(Idempotency::of(&Method::GET), SAFE);
        assert_eq!(Idempotency::of(&Method::PUT), SAFE);
        assert_eq!(Idempotency::of(&Method::DELETE), SAFE);
        assert_eq!(Idempotency::of(&Method::POST), UNSAFE);
        assert_eq!(Idempotency::of(&Method::PATCH), UNSAFE);
    }

    #[test]
    fn test_no_retry() {
        let config = RetryConfig::no_retry();
        assert!(!config.should_retry(&http(500), 0, SAFE));
        assert!(!config.should_retry(&http(429), 0, SAFE));
    }

    #[test]
    fn test_backoff_is_capped() {
        let config = RetryConfig::default().max_delay(Duration::from_secs(1));
        assert_eq!(
            config.next_delay(Duration::from_millis(300)),
            Duration::from_millis(600)
        );
        assert_eq!(
            config.next_delay(Duration::from_millis(800)),
            Duration::from_secs(1)
        );
    }
}
