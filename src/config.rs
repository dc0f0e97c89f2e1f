// src/config.rs

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::domain::criteria::{DEFAULT_DAYS_OLD, DEFAULT_RADIUS_MILES, DEFAULT_RESULT_CAP};
use crate::transport::RetryPolicy;

const DEFAULT_OPENCAGE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";
const DEFAULT_RENTCAST_URL: &str = "https://api.rentcast.io/v1/listings/rental/long-term";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the service needs from its environment, read once at startup
/// and handed to each collaborator's constructor.
#[derive(Debug, Clone)]
pub struct Settings {
    pub opencage_api_key: String,
    pub rentcast_api_key: String,

    pub opencage_url: Url,
    pub rentcast_url: Url,

    pub rentcast_radius_miles_default: f64,
    pub rentcast_days_old_default: String,
    /// Requested listing count; the provider call sends `min(50, cap)`.
    pub rentcast_request_cap: usize,
    pub request_timeout_seconds: u64,
    pub max_results: usize,
    /// Only connect errors and 5xx are retried, so a timed-out call costs one
    /// `request_timeout_seconds` and never more.
    pub http_max_attempts: u32,
    /// Unset means comps may exceed the target bedroom count by any amount.
    pub max_bedroom_surplus: Option<u32>,
    pub mock_fallback: bool,

    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            opencage_api_key: String::new(),
            rentcast_api_key: String::new(),
            opencage_url: Url::parse(DEFAULT_OPENCAGE_URL).expect("default url is valid"),
            rentcast_url: Url::parse(DEFAULT_RENTCAST_URL).expect("default url is valid"),
            rentcast_radius_miles_default: DEFAULT_RADIUS_MILES,
            rentcast_days_old_default: DEFAULT_DAYS_OLD.to_string(),
            rentcast_request_cap: 100,
            request_timeout_seconds: 12,
            max_results: DEFAULT_RESULT_CAP,
            http_max_attempts: 2,
            max_bedroom_surplus: None,
            mock_fallback: false,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_workers: 8,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            opencage_api_key: get("OPENCAGE_API_KEY").ok_or(ConfigError::Missing("OPENCAGE_API_KEY"))?,
            rentcast_api_key: get("RENTCAST_API_KEY").ok_or(ConfigError::Missing("RENTCAST_API_KEY"))?,
            opencage_url: parse_or(get("OPENCAGE_URL"), "OPENCAGE_URL", defaults.opencage_url)?,
            rentcast_url: parse_or(get("RENTCAST_URL"), "RENTCAST_URL", defaults.rentcast_url)?,
            rentcast_radius_miles_default: parse_or(
                get("RENTCAST_RADIUS_MILES_DEFAULT"),
                "RENTCAST_RADIUS_MILES_DEFAULT",
                defaults.rentcast_radius_miles_default,
            )?,
            rentcast_days_old_default: get("RENTCAST_DAYS_OLD_DEFAULT")
                .unwrap_or(defaults.rentcast_days_old_default),
            rentcast_request_cap: parse_or(
                get("RENTCAST_REQUEST_CAP"),
                "RENTCAST_REQUEST_CAP",
                defaults.rentcast_request_cap,
            )?,
            request_timeout_seconds: parse_or(
                get("REQUEST_TIMEOUT_SECONDS"),
                "REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            )?,
            max_results: parse_or(get("MAX_RESULTS"), "MAX_RESULTS", defaults.max_results)?,
            http_max_attempts: parse_or(
                get("HTTP_MAX_ATTEMPTS"),
                "HTTP_MAX_ATTEMPTS",
                defaults.http_max_attempts,
            )?,
            max_bedroom_surplus: get("MAX_BEDROOM_SURPLUS")
                .map(|v| parse_value(&v, "MAX_BEDROOM_SURPLUS"))
                .transpose()?,
            mock_fallback: parse_or(get("MOCK_FALLBACK"), "MOCK_FALLBACK", defaults.mock_fallback)?,
            bind_addr: parse_or(get("BIND_ADDR"), "BIND_ADDR", defaults.bind_addr)?,
            max_workers: parse_or(get("MAX_WORKERS"), "MAX_WORKERS", defaults.max_workers)?,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        if self.http_max_attempts <= 1 {
            return RetryPolicy::no_retries();
        }
        RetryPolicy {
            max_attempts: self.http_max_attempts,
            ..RetryPolicy::default()
        }
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => parse_value(&v, key),
        None => Ok(default),
    }
}

fn parse_value<T>(raw: &str, key: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
