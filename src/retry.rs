//! Retry logic with exponential backoff
//!
//! Used by the HTTP fetcher to ride out transport hiccups (DNS, connect,
//! timeouts). HTTP statuses are answers, not failures, and never reach this
//! module.
//!
//! # Example
//!
//! ```no_run
//! use hikr_dl::retry::{IsRetryable, with_retry};
//! use hikr_dl::config::RetryConfig;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     Transient,
//!     Permanent,
//! }
//!
//! impl std::fmt::Display for MyError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{:?}", self)
//!     }
//! }
//!
//! impl IsRetryable for MyError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, MyError::Transient)
//!     }
//! }
//!
//! # async fn example() -> Result<(), MyError> {
//! let config = RetryConfig::default();
//! with_retry(&config, || async { Ok::<_, MyError>(()) }).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::Error;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(e) => e.is_timeout() || e.is_connect(),
            Error::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::Interrupted
            ),
            // Everything else is local or a content problem
            Error::Config { .. }
            | Error::Serialization(_)
            | Error::ClientInit(_)
            | Error::MissingDirectory { .. }
            | Error::IdAllocation { .. }
            | Error::PostPageUnreadable { .. }
            | Error::Extract(_)
            | Error::InvalidTitle { .. }
            | Error::FileCollision { .. }
            | Error::Rename { .. } => false,
        }
    }
}

/// Run `operation`, retrying transient failures with exponential backoff
///
/// One initial call plus at most `config.max_attempts` retries. The first
/// success wins; a permanent error or the last transient one is returned as is.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut delay = config.initial_delay;
    let mut retry = 0;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if retry > 0 {
                    tracing::info!(retries = retry, "Recovered after retrying");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if !error.is_retryable() {
            return Err(error);
        }
        if retry >= config.max_attempts {
            if retry > 0 {
                tracing::debug!(error = %error, retries = retry, "Giving up");
            }
            return Err(error);
        }
        retry += 1;

        let pause = if config.jitter {
            add_jitter(delay)
        } else {
            delay
        };
        tracing::warn!(
            error = %error,
            retry,
            of = config.max_attempts,
            pause_ms = pause.as_millis() as u64,
            "Transient failure, retrying"
        );
        tokio::time::sleep(pause).await;
        delay = next_delay(delay, config);
    }
}

/// Grow `delay` by the backoff multiplier, capped at `max_delay`
fn next_delay(delay: Duration, config: &RetryConfig) -> Duration {
    delay.mul_f64(config.backoff_multiplier).min(config.max_delay)
}

/// Stretch `delay` by a random 0-100%, landing in `[delay, 2 * delay]`
fn add_jitter(delay: Duration) -> Duration {
    delay.mul_f64(1.0 + rand::thread_rng().gen_range(0.0..=1.0))
}
