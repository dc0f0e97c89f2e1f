// src/validators.rs

use regex::Regex;
use std::sync::LazyLock;

// number + street, city, two-letter state, optional ZIP or ZIP+4
static US_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d+\s+.+,\s*.+,\s*[A-Z]{2}(\s+\d{5}(-\d{4})?)?$").expect("valid regex")
});

const MIN_ADDRESS_LEN: usize = 10;

/// Rough shape check for a US street address before we spend a geocoder call.
pub fn is_valid_us_address(address: &str) -> bool {
    let address = address.trim();
    address.len() >= MIN_ADDRESS_LEN && US_ADDRESS.is_match(address)
}

/// True when `bathrooms` is a whole multiple of 0.5.
pub fn is_half_step(bathrooms: f64) -> bool {
    bathrooms.is_finite() && (bathrooms * 2.0).fract() == 0.0
}
