// src/geos/distance.rs

/// Earth's mean radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle (haversine) distance in miles, rounded to one decimal place.
///
/// Inputs are taken as-is; range checks belong to the caller.
/// The rounding is part of the contract: comps are ranked and compared on it.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    round_tenths(EARTH_RADIUS_MILES * c)
}

fn round_tenths(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}
