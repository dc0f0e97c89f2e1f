use serde::Serialize;

use crate::domain::ComparableProperty;
use crate::errors::{ErrorCode, ServerError};

/// What we understood the request to be, echoed back with the comps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSummary {
    pub resolved_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub radius_miles: f64,
    pub days_old: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompsResponse {
    pub input: InputSummary,
    pub comps: Vec<ComparableProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&ServerError> for ErrorResponse {
    fn from(err: &ServerError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
