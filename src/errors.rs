// errors.rs
use serde::Serialize;
use thiserror::Error;

use crate::geocoding::ResolveError;

/// The closed set of error codes a caller can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "400_INVALID_INPUT")]
    InvalidInput,
    #[serde(rename = "404_NO_RESULTS")]
    NoResults,
    #[serde(rename = "422_VALIDATION_ERROR")]
    ValidationError,
    #[serde(rename = "429_RATE_LIMITED")]
    RateLimited,
    #[serde(rename = "502_PROVIDER_UNAVAILABLE")]
    ProviderUnavailable,
}

impl ErrorCode {
    pub fn status(self) -> u16 {
        match self {
            ErrorCode::InvalidInput => 400,
            ErrorCode::NoResults => 404,
            ErrorCode::ValidationError => 422,
            ErrorCode::RateLimited => 429,
            ErrorCode::ProviderUnavailable => 502,
        }
    }
}

/// Errors a request can end in. Each maps onto an `ErrorCode` and a status.
#[derive(Debug, Error, PartialEq)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NoResults(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    ProviderUnavailable(String),
    #[error("Internal server error")]
    InternalError,
}

impl ServerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServerError::NotFound | ServerError::NoResults(_) => ErrorCode::NoResults,
            ServerError::Validation(_) => ErrorCode::ValidationError,
            ServerError::InvalidInput(_) => ErrorCode::InvalidInput,
            ServerError::RateLimited(_) => ErrorCode::RateLimited,
            ServerError::ProviderUnavailable(_) | ServerError::InternalError => {
                ErrorCode::ProviderUnavailable
            }
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ServerError::InternalError => 500,
            other => other.code().status(),
        }
    }
}

impl From<ResolveError> for ServerError {
    fn from(err: ResolveError) -> Self {
        let message = err.to_string();
        match err {
            ResolveError::EmptyAddress
            | ResolveError::NotFound
            | ResolveError::MissingCoordinates => ServerError::InvalidInput(message),
            ResolveError::RateLimited => ServerError::RateLimited(message),
            ResolveError::Timeout | ResolveError::Http(_) | ResolveError::Unavailable(_) => {
                ServerError::ProviderUnavailable(message)
            }
        }
    }
}
