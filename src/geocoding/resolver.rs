// src/geocoding/resolver.rs

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::Settings;
use crate::geocoding::models::GeocodeResponse;
use crate::geocoding::ResolveError;
use crate::geos::Coordinate;
use crate::transport::RetryPolicy;

/// A geocoded address: where it is, and how the geocoder spells it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub formatted_address: String,
}

/// Turns free-text addresses into coordinates.
pub trait LocationResolver: Send + Sync {
    fn resolve(&self, address: &str) -> Result<ResolvedLocation, ResolveError>;
}

/// OpenCage forward geocoding, restricted to US results.
pub struct OpenCageResolver {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl OpenCageResolver {
    pub fn new(settings: &Settings) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| ResolveError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.opencage_url.to_string(),
            api_key: settings.opencage_api_key.clone(),
            retry: settings.retry_policy(),
        })
    }

    fn query<'a>(&'a self, address: &'a str) -> [(&'static str, &'a str); 6] {
        [
            ("q", address),
            ("key", self.api_key.as_str()),
            ("countrycode", "us"),
            ("limit", "1"),
            ("no_annotations", "1"),
            ("min_confidence", "9"),
        ]
    }
}

impl LocationResolver for OpenCageResolver {
    fn resolve(&self, address: &str) -> Result<ResolvedLocation, ResolveError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ResolveError::EmptyAddress);
        }

        tracing::info!(address, "geocoding address");

        let params = self.query(address);
        let resp = self
            .retry
            .send(|| self.client.get(&self.base_url).query(&params))
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!(address, "timeout geocoding address");
                    ResolveError::Timeout
                } else {
                    tracing::error!(address, error = %e, "geocoding request failed");
                    ResolveError::Unavailable(e.to_string())
                }
            })?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::error!("rate limited by geocoding service");
            return Err(ResolveError::RateLimited);
        }
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "geocoding service error");
            return Err(ResolveError::Http(status.as_u16()));
        }

        let body = resp
            .text()
            .map_err(|e| ResolveError::Unavailable(e.to_string()))?;

        let location = interpret_response(&body, address)?;
        tracing::info!(
            latitude = location.coordinate.latitude,
            longitude = location.coordinate.longitude,
            "geocoded"
        );
        Ok(location)
    }
}

/// Reads the first geocoder result. Falls back to `query` when the geocoder
/// returns coordinates without a formatted address.
pub fn interpret_response(body: &str, query: &str) -> Result<ResolvedLocation, ResolveError> {
    let data: GeocodeResponse = serde_json::from_str(body)
        .map_err(|e| ResolveError::Unavailable(format!("invalid geocoder response: {e}")))?;

    let result = data.results.into_iter().next().ok_or(ResolveError::NotFound)?;

    let (lat, lng) = result
        .geometry
        .and_then(|g| Some((g.lat?, g.lng?)))
        .ok_or(ResolveError::MissingCoordinates)?;
    let coordinate = Coordinate::new(lat, lng).ok_or(ResolveError::MissingCoordinates)?;

    let formatted_address = result
        .formatted
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| query.to_string());

    Ok(ResolvedLocation {
        coordinate,
        formatted_address,
    })
}
