// src/rentals/provider.rs

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Settings;
use crate::domain::SearchCriteria;
use crate::rentals::models::RawListing;
use crate::rentals::ProviderError;
use crate::transport::RetryPolicy;

/// Hard ceiling the listings API puts on `limit`.
const PROVIDER_PAGE_MAX: usize = 50;

/// What a provider call produced. Failures stay tagged here; the selector
/// decides to treat them as "no listings".
#[derive(Debug)]
pub enum ProviderOutcome {
    Listings(Vec<RawListing>),
    Failure(ProviderError),
}

/// Source of raw rental listings around a subject coordinate.
pub trait ListingProvider: Send + Sync {
    fn fetch(&self, criteria: &SearchCriteria, limit_cap: usize) -> ProviderOutcome;
}

/// RentCast long-term rental listings.
pub struct RentcastClient {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl RentcastClient {
    pub fn new(settings: &Settings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.rentcast_url.to_string(),
            api_key: settings.rentcast_api_key.clone(),
            retry: settings.retry_policy(),
        })
    }

    fn query(criteria: &SearchCriteria, limit_cap: usize) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", criteria.subject.latitude.to_string()),
            ("longitude", criteria.subject.longitude.to_string()),
            ("radius", criteria.radius_miles.to_string()),
            ("daysOld", criteria.days_old.clone()),
            ("limit", limit_cap.min(PROVIDER_PAGE_MAX).to_string()),
            ("bedrooms", criteria.bedrooms.to_string()),
            ("bathrooms", criteria.bathrooms.to_string()),
        ]
    }

    fn try_fetch(
        &self,
        criteria: &SearchCriteria,
        limit_cap: usize,
    ) -> Result<Vec<RawListing>, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| ProviderError::Network(format!("invalid api key header: {e}")))?;
        headers.insert("x-api-key", api_key);

        let params = Self::query(criteria, limit_cap);

        let resp = self
            .retry
            .send(|| {
                self.client
                    .get(&self.base_url)
                    .headers(headers.clone())
                    .query(&params)
            })
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(ProviderError::Http(status.as_u16()));
        }

        let text = resp
            .text()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        parse_listings(&text)
    }
}

impl ListingProvider for RentcastClient {
    fn fetch(&self, criteria: &SearchCriteria, limit_cap: usize) -> ProviderOutcome {
        tracing::info!(
            latitude = criteria.subject.latitude,
            longitude = criteria.subject.longitude,
            bedrooms = criteria.bedrooms,
            bathrooms = criteria.bathrooms,
            radius = criteria.radius_miles,
            "fetching rental listings"
        );

        match self.try_fetch(criteria, limit_cap) {
            Ok(listings) => {
                tracing::info!(count = listings.len(), "rental listings received");
                ProviderOutcome::Listings(listings)
            }
            Err(e) => {
                tracing::error!(error = %e, "rental listings request failed");
                ProviderOutcome::Failure(e)
            }
        }
    }
}

/// The payload must be a JSON array. Elements that aren't objects are
/// dropped one by one; they don't sink the rest of the page.
pub fn parse_listings(body: &str) -> Result<Vec<RawListing>, ProviderError> {
    let data: Value =
        serde_json::from_str(body).map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

    let items = match data {
        Value::Array(items) => items,
        other => {
            let kind = match other {
                Value::Object(_) => "object",
                Value::String(_) => "string",
                Value::Number(_) => "number",
                Value::Bool(_) => "bool",
                _ => "null",
            };
            return Err(ProviderError::MalformedPayload(format!(
                "expected an array of listings, got {kind}"
            )));
        }
    };

    let listings = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<RawListing>(item) {
            Ok(listing) => Some(listing),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "skipping malformed listing");
                None
            }
        })
        .collect();

    Ok(listings)
}
