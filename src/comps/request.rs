// src/comps/request.rs

use serde::Deserialize;

use crate::config::Settings;
use crate::errors::ServerError;
use crate::validators::is_half_step;

/// Body of `POST /api/v1/comps`, as sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompsRequest {
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Whole number; an integral float such as `2.0` is accepted.
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    #[serde(alias = "radiusMiles")]
    pub radius_miles: Option<f64>,
    #[serde(alias = "daysOld")]
    pub days_old: Option<String>,
}

/// Where the subject is, in whichever form the caller gave it.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    Coordinates {
        latitude: f64,
        longitude: f64,
        address: Option<String>,
    },
    Address(String),
}

/// A request that passed shape validation, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub location: LocationInput,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub radius_miles: f64,
    pub days_old: String,
}

impl CompsRequest {
    /// Shape checks only; nothing here touches the network.
    pub fn validate(&self, settings: &Settings) -> Result<ValidatedRequest, ServerError> {
        let address = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        // coordinates win when both forms are present
        let location = match (self.latitude, self.longitude, address) {
            (Some(latitude), Some(longitude), address) => LocationInput::Coordinates {
                latitude,
                longitude,
                address,
            },
            (_, _, Some(address)) => LocationInput::Address(address),
            _ => {
                return Err(invalid(
                    "Must provide either address or latitude & longitude",
                ))
            }
        };

        let bedrooms = self.bedrooms.ok_or_else(|| invalid("bedrooms is required"))?;
        if !(bedrooms.is_finite() && bedrooms.fract() == 0.0) {
            return Err(invalid("bedrooms must be a whole number"));
        }
        if bedrooms < 0.0 || bedrooms > f64::from(u32::MAX) {
            return Err(invalid("bedrooms must be >= 0"));
        }
        let bedrooms = bedrooms as u32;

        let bathrooms = self
            .bathrooms
            .ok_or_else(|| invalid("bathrooms is required"))?;
        if !(bathrooms > 0.0) {
            return Err(invalid("bathrooms must be > 0"));
        }
        if !is_half_step(bathrooms) {
            return Err(invalid(
                "Bathrooms must be in 0.5 increments (e.g., 1, 1.5, 2)",
            ));
        }

        let radius_miles = self
            .radius_miles
            .unwrap_or(settings.rentcast_radius_miles_default);
        if !(radius_miles.is_finite() && radius_miles > 0.0) {
            return Err(invalid("radius_miles must be > 0"));
        }

        let days_old = self
            .days_old
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| settings.rentcast_days_old_default.clone());

        Ok(ValidatedRequest {
            location,
            bedrooms,
            bathrooms,
            radius_miles,
            days_old,
        })
    }
}

fn invalid(msg: &str) -> ServerError {
    ServerError::Validation(msg.to_string())
}
