// src/geos/coordinate.rs

use serde::{Deserialize, Serialize};

use super::distance::distance;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, or `None` when either axis is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if is_valid(latitude, longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }

    /// Miles to `other`, rounded to one decimal.
    pub fn miles_to(&self, other: &Coordinate) -> f64 {
        distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// Latitude in [-90, 90] and longitude in [-180, 180]. NaN is never valid.
pub fn is_valid(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}
