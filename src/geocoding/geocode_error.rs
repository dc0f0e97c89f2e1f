use thiserror::Error;

/// Why an address could not be turned into a coordinate.
///
/// `NotFound` and `RateLimited` are kept apart so callers can choose between
/// telling the user and trying again later.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    #[error("Address cannot be empty")]
    EmptyAddress,
    #[error("Address not found or invalid")]
    NotFound,
    #[error("Could not extract coordinates from address")]
    MissingCoordinates,
    #[error("Rate limited by geocoding service")]
    RateLimited,
    #[error("Geocoding service timeout")]
    Timeout,
    #[error("Geocoding service error: {0}")]
    Http(u16),
    #[error("Geocoding service unavailable: {0}")]
    Unavailable(String),
}
