// src/domain/criteria.rs

use crate::geos::Coordinate;

pub const DEFAULT_RADIUS_MILES: f64 = 5.0;
pub const DEFAULT_DAYS_OLD: &str = "*:270";
pub const DEFAULT_RESULT_CAP: usize = 5;

/// Everything one comps search needs once the subject location is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub subject: Coordinate,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub radius_miles: f64,
    /// Listing age token, e.g. "*:270" (any minimum, at most 270 days).
    pub days_old: String,
    pub result_cap: usize,
    /// Upper bound on bedrooms above target. `None` means no ceiling.
    pub max_bedroom_surplus: Option<u32>,
}

impl SearchCriteria {
    pub fn new(subject: Coordinate, bedrooms: u32, bathrooms: f64) -> Self {
        Self {
            subject,
            bedrooms,
            bathrooms,
            radius_miles: DEFAULT_RADIUS_MILES,
            days_old: DEFAULT_DAYS_OLD.to_string(),
            result_cap: DEFAULT_RESULT_CAP,
            max_bedroom_surplus: None,
        }
    }

    pub fn with_radius(mut self, radius_miles: f64) -> Self {
        self.radius_miles = radius_miles;
        self
    }

    pub fn with_days_old(mut self, days_old: impl Into<String>) -> Self {
        self.days_old = days_old.into();
        self
    }

    pub fn with_result_cap(mut self, result_cap: usize) -> Self {
        self.result_cap = result_cap;
        self
    }

    pub fn with_max_bedroom_surplus(mut self, surplus: Option<u32>) -> Self {
        self.max_bedroom_surplus = surplus;
        self
    }
}
