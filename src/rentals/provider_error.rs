use thiserror::Error;

/// Anything that kept the listings provider from handing back a usable payload.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Listings request timed out")]
    Timeout,
    #[error("Rate limited by listings provider")]
    RateLimited,
    #[error("Listings provider returned HTTP {0}")]
    Http(u16),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected payload shape: {0}")]
    MalformedPayload(String),
}
