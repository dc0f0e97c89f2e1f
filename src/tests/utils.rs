use crate::comps::CompsService;
use crate::config::Settings;
use crate::domain::SearchCriteria;
use crate::geocoding::{LocationResolver, ResolveError, ResolvedLocation};
use crate::geos::Coordinate;
use crate::rentals::{parse_listings, ListingProvider, ProviderError, ProviderOutcome};
use astra::{Body, Request, Response};
use http::Method;
use serde_json::{json, Value};
use std::io::Read;
use std::sync::{Arc, Mutex};

pub const SUBJECT: (f64, f64) = (30.2672, -97.7431);

/// What the fake provider hands back on every call.
#[derive(Clone)]
pub enum Listings {
    Json(Value),
    Fail(fn() -> ProviderError),
}

#[derive(Default)]
pub struct Calls {
    pub resolved: Mutex<Vec<String>>,
    pub fetched: Mutex<Vec<(SearchCriteria, usize)>>,
}

pub struct FakeResolver {
    result: Result<ResolvedLocation, ResolveError>,
    calls: Arc<Calls>,
}

impl LocationResolver for FakeResolver {
    fn resolve(&self, address: &str) -> Result<ResolvedLocation, ResolveError> {
        self.calls.resolved.lock().unwrap().push(address.to_string());
        self.result.clone()
    }
}

pub struct FakeProvider {
    listings: Listings,
    calls: Arc<Calls>,
}

impl ListingProvider for FakeProvider {
    fn fetch(&self, criteria: &SearchCriteria, limit_cap: usize) -> ProviderOutcome {
        self.calls
            .fetched
            .lock()
            .unwrap()
            .push((criteria.clone(), limit_cap));

        match &self.listings {
            // same parsing path as the real client
            Listings::Json(v) => match parse_listings(&v.to_string()) {
                Ok(listings) => ProviderOutcome::Listings(listings),
                Err(e) => ProviderOutcome::Failure(e),
            },
            Listings::Fail(make) => ProviderOutcome::Failure(make()),
        }
    }
}

pub fn austin() -> ResolvedLocation {
    ResolvedLocation {
        coordinate: Coordinate::new(SUBJECT.0, SUBJECT.1).unwrap(),
        formatted_address: "123 Main St, Austin, TX 78701, USA".to_string(),
    }
}

/// Service backed by fakes, plus a handle on what they were asked.
pub fn test_service(
    settings: Settings,
    resolved: Result<ResolvedLocation, ResolveError>,
    listings: Listings,
) -> (CompsService, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    let resolver = FakeResolver {
        result: resolved,
        calls: calls.clone(),
    };
    let provider = FakeProvider {
        listings,
        calls: calls.clone(),
    };

    (
        CompsService::new(settings, Box::new(resolver), Box::new(provider)),
        calls,
    )
}

/// A provider listing `north_miles` due north of the subject.
pub fn listing_north(address: &str, north_miles: f64, price: i64, beds: i64, baths: f64, sqft: Option<i64>) -> Value {
    json!({
        "formattedAddress": address,
        "city": "Austin",
        "state": "TX",
        "zipCode": "78702",
        "county": "Travis",
        "latitude": SUBJECT.0 + north_miles / 69.09,
        "longitude": SUBJECT.1,
        "price": price,
        "bedrooms": beds,
        "bathrooms": baths,
        "squareFootage": sqft,
    })
}

pub fn post_json(path: &str, body: &str) -> Request {
    let mut req = Request::new(Body::from(body.to_string()));
    *req.method_mut() = Method::POST;
    *req.uri_mut() = path.parse().unwrap();
    req
}

pub fn get(path: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = path.parse().unwrap();
    req
}

pub fn body_json(mut resp: Response) -> Value {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
