// src/domain/comp.rs

use serde::Serialize;

/// A rental listing that passed validation and the comparability floor.
///
/// Only the listing normalizer builds these. They are never modified afterwards
/// and live for a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparableProperty {
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    pub price: i64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_footage: Option<i64>,

    /// Miles from the subject property, one decimal.
    pub distance_miles: f64,
}

impl ComparableProperty {
    /// Case-folded address used for duplicate detection.
    pub fn address_key(&self) -> String {
        self.address.to_lowercase()
    }

    /// Square footage for ranking only; absent counts as 0.
    pub fn sqft_for_ranking(&self) -> i64 {
        self.square_footage.unwrap_or(0)
    }
}
