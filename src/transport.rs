// src/transport.rs

use rand::Rng;
use reqwest::blocking::{RequestBuilder, Response};
use std::time::Duration;

const MAX_BACKOFF_MS: u64 = 2_000;
const JITTER_MAX_MS: u64 = 250;

/// How often, and how patiently, a collaborator call is retried.
///
/// Only connection errors and 5xx responses are retried. Timeouts, 429 and
/// other 4xx responses come straight back to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_backoff: Duration::from_millis(300),
        }
    }
}

impl RetryPolicy {
    pub fn no_retries() -> Self {
        Self {
            max_attempts: 1,
            base_backoff: Duration::ZERO,
        }
    }

    /// Linear backoff capped at two seconds, before jitter.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let ms = self.base_backoff.as_millis() as u64 * u64::from(attempt);
        Duration::from_millis(ms.min(MAX_BACKOFF_MS))
    }

    /// Sends the request built by `build`, retrying transient failures.
    ///
    /// `build` is called once per attempt since a blocking request can't be reused.
    pub fn send<F>(&self, build: F) -> Result<Response, reqwest::Error>
    where
        F: Fn() -> RequestBuilder,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let result = build().send();
            let retry = attempt < attempts && is_transient(&result);

            if !retry {
                return result;
            }

            match &result {
                Ok(resp) => {
                    tracing::warn!(attempt, status = %resp.status(), "transient HTTP status, retrying")
                }
                Err(e) => tracing::warn!(attempt, error = %e, "transient transport error, retrying"),
            }

            let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_MS);
            std::thread::sleep(self.backoff(attempt) + Duration::from_millis(jitter));
            attempt += 1;
        }
    }
}

fn is_transient(result: &Result<Response, reqwest::Error>) -> bool {
    match result {
        Ok(resp) => resp.status().is_server_error(),
        Err(e) => is_transient_error(e),
    }
}

fn is_transient_error(e: &reqwest::Error) -> bool {
    e.is_connect() && !e.is_timeout()
}
