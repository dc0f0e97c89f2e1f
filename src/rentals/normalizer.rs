// src/rentals/normalizer.rs

use serde_json::Value;
use thiserror::Error;

use crate::domain::ComparableProperty;
use crate::geos::Coordinate;
use crate::rentals::models::RawListing;

/// Why a raw listing did not become a comp. Never escalated past the selector.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Rejection {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("below comparability floor ({bedrooms}br/{bathrooms}ba)")]
    BelowFloor { bedrooms: f64, bathrooms: f64 },
    #[error("{field} is not numeric: {value}")]
    Coercion { field: &'static str, value: String },
    #[error("coordinate out of range: {latitude}, {longitude}")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },
}

/// Converts one provider listing into a comp measured from `subject`.
///
/// Checks run in order and stop at the first failure:
/// 1. price, address, latitude and longitude are present and truthy
/// 2. bedrooms and bathrooms meet or exceed the targets
/// 3. numeric fields coerce cleanly (square footage is optional)
/// 4. distance to the subject is computed
pub fn normalize(
    raw: &RawListing,
    subject: &Coordinate,
    target_bedrooms: u32,
    target_bathrooms: f64,
) -> Result<ComparableProperty, Rejection> {
    // 1. required presence; formatted address wins over the plain one
    let address = raw
        .formatted_address
        .as_ref()
        .filter(|v| truthy(v))
        .or_else(|| raw.address.as_ref().filter(|v| truthy(v)))
        .ok_or(Rejection::MissingField("address"))?;
    let price = required(&raw.price, "price")?;
    let latitude = required(&raw.latitude, "latitude")?;
    let longitude = required(&raw.longitude, "longitude")?;

    // 2. comparability floor, on the values as listed
    let bedrooms = raw
        .bedrooms
        .as_ref()
        .ok_or(Rejection::MissingField("bedrooms"))
        .and_then(|v| coerce_float(v, "bedrooms"))?;
    let bathrooms = raw
        .bathrooms
        .as_ref()
        .ok_or(Rejection::MissingField("bathrooms"))
        .and_then(|v| coerce_float(v, "bathrooms"))?;

    if bedrooms < f64::from(target_bedrooms) || bathrooms < target_bathrooms {
        return Err(Rejection::BelowFloor {
            bedrooms,
            bathrooms,
        });
    }

    // 3. coercion
    let address = match address {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        other => {
            return Err(Rejection::Coercion {
                field: "address",
                value: other.to_string(),
            })
        }
    };
    let price = coerce_int(price, "price")?;
    if price <= 0 {
        return Err(Rejection::Coercion {
            field: "price",
            value: price.to_string(),
        });
    }
    let square_footage = match raw.square_footage.as_ref().filter(|v| truthy(v)) {
        Some(v) => Some(coerce_int(v, "squareFootage")?),
        None => None,
    };
    let latitude = coerce_float(latitude, "latitude")?;
    let longitude = coerce_float(longitude, "longitude")?;
    let location =
        Coordinate::new(latitude, longitude).ok_or(Rejection::CoordinateOutOfRange {
            latitude,
            longitude,
        })?;

    // 4. distance
    let distance_miles = subject.miles_to(&location);

    Ok(ComparableProperty {
        address,
        city: text(&raw.city),
        state: text(&raw.state),
        zip_code: text(&raw.zip_code),
        county: text(&raw.county),
        latitude: Some(latitude),
        longitude: Some(longitude),
        price,
        // floor passed, so bedrooms >= target >= 0; fractions truncate
        bedrooms: bedrooms.trunc() as u32,
        bathrooms,
        square_footage,
        distance_miles,
    })
}

fn required<'a>(field: &'a Option<Value>, name: &'static str) -> Result<&'a Value, Rejection> {
    field
        .as_ref()
        .filter(|v| truthy(v))
        .ok_or(Rejection::MissingField(name))
}

/// Loose truthiness: null, false, zero and empty values count as missing.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Integer from a JSON number (fractions truncate) or a numeric string.
fn coerce_int(value: &Value, field: &'static str) -> Result<i64, Rejection> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Rejection::Coercion {
        field,
        value: value.to_string(),
    })
}

fn coerce_float(value: &Value, field: &'static str) -> Result<f64, Rejection> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| Rejection::Coercion {
            field,
            value: value.to_string(),
        })
}

fn text(field: &Option<Value>) -> Option<String> {
    match field.as_ref()? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
