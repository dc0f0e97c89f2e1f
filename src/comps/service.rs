// src/comps/service.rs

use crate::comps::request::{CompsRequest, LocationInput};
use crate::comps::response::{CompsResponse, InputSummary};
use crate::config::Settings;
use crate::domain::SearchCriteria;
use crate::errors::ServerError;
use crate::geocoding::{LocationResolver, OpenCageResolver};
use crate::geos::Coordinate;
use crate::rentals::{mock_comps, select_outcome, ListingProvider, RentcastClient};
use crate::validators::is_valid_us_address;

/// Runs one comps request end to end: validate, resolve, fetch, select.
pub struct CompsService {
    settings: Settings,
    resolver: Box<dyn LocationResolver>,
    provider: Box<dyn ListingProvider>,
}

impl CompsService {
    pub fn new(
        settings: Settings,
        resolver: Box<dyn LocationResolver>,
        provider: Box<dyn ListingProvider>,
    ) -> Self {
        Self {
            settings,
            resolver,
            provider,
        }
    }

    /// Wires up the real geocoder and listings provider.
    pub fn from_settings(settings: Settings) -> Result<Self, ServerError> {
        let resolver = OpenCageResolver::new(&settings)
            .map_err(|e| ServerError::ProviderUnavailable(e.to_string()))?;
        let provider = RentcastClient::new(&settings)
            .map_err(|e| ServerError::ProviderUnavailable(e.to_string()))?;

        Ok(Self::new(settings, Box::new(resolver), Box::new(provider)))
    }

    pub fn get_comps(&self, request: &CompsRequest) -> Result<CompsResponse, ServerError> {
        let request = request.validate(&self.settings)?;
        let (subject, resolved_address) = self.resolve_location(&request.location)?;

        let criteria = SearchCriteria::new(subject, request.bedrooms, request.bathrooms)
            .with_radius(request.radius_miles)
            .with_days_old(request.days_old.clone())
            .with_result_cap(self.settings.max_results)
            .with_max_bedroom_surplus(self.settings.max_bedroom_surplus);

        let outcome = self
            .provider
            .fetch(&criteria, self.settings.rentcast_request_cap);
        let mut comps = select_outcome(outcome, &criteria);

        if comps.is_empty() {
            if !self.settings.mock_fallback {
                return Err(ServerError::NoResults("No rental comps found".to_string()));
            }
            tracing::warn!("no rental comps found, using mock data");
            comps = mock_comps(&criteria);
        }

        tracing::info!(count = comps.len(), address = %resolved_address, "returning comps");

        Ok(CompsResponse {
            input: InputSummary {
                resolved_address,
                latitude: subject.latitude,
                longitude: subject.longitude,
                bedrooms: request.bedrooms,
                bathrooms: request.bathrooms,
                radius_miles: request.radius_miles,
                days_old: request.days_old,
            },
            comps,
        })
    }

    /// Coordinates are used as given; an address goes through the resolver.
    fn resolve_location(
        &self,
        location: &LocationInput,
    ) -> Result<(Coordinate, String), ServerError> {
        match location {
            LocationInput::Coordinates {
                latitude,
                longitude,
                address,
            } => {
                let subject = Coordinate::new(*latitude, *longitude).ok_or_else(|| {
                    ServerError::InvalidInput("Invalid coordinates provided".to_string())
                })?;
                let resolved = address
                    .clone()
                    .unwrap_or_else(|| format!("Location at {latitude}, {longitude}"));
                Ok((subject, resolved))
            }
            LocationInput::Address(address) => {
                if !is_valid_us_address(address) {
                    return Err(ServerError::InvalidInput(
                        "Invalid US address format".to_string(),
                    ));
                }
                let resolved = self.resolver.resolve(address).map_err(|e| {
                    tracing::error!(address = %address, error = %e, "could not resolve location");
                    ServerError::from(e)
                })?;
                Ok((resolved.coordinate, resolved.formatted_address))
            }
        }
    }
}
