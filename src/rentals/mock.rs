// src/rentals/mock.rs

use crate::domain::{ComparableProperty, SearchCriteria};

/// Canned comps for development when the real provider comes back empty.
/// Only served when `MOCK_FALLBACK` is enabled.
pub fn mock_comps(criteria: &SearchCriteria) -> Vec<ComparableProperty> {
    let fixtures = [
        ("123 Mock St, Test City, FL 33301", 2400, 1400, 0.8),
        ("456 Sample Ave, Test City, FL 33301", 2300, 1350, 1.2),
        ("789 Demo Blvd, Test City, FL 33301", 2500, 1500, 1.5),
    ];

    fixtures
        .into_iter()
        .map(|(address, price, sqft, distance)| ComparableProperty {
            address: address.to_string(),
            city: Some("Test City".to_string()),
            state: Some("FL".to_string()),
            zip_code: Some("33301".to_string()),
            county: Some("Test County".to_string()),
            latitude: Some(criteria.subject.latitude),
            longitude: Some(criteria.subject.longitude),
            price,
            bedrooms: criteria.bedrooms,
            bathrooms: criteria.bathrooms,
            square_footage: Some(sqft),
            distance_miles: distance,
        })
        .take(criteria.result_cap)
        .collect()
}
