// src/tests/router_tests/comps_tests.rs

use crate::config::Settings;
use crate::geocoding::ResolveError;
use crate::rentals::ProviderError;
use crate::router::respond;
use crate::tests::utils::{
    austin, body_json, listing_north, post_json, test_service, Listings, SUBJECT,
};
use serde_json::{json, Value};

const COMPS: &str = "/api/v1/comps";

fn coords_body(bedrooms: i64, bathrooms: f64) -> String {
    json!({
        "latitude": SUBJECT.0,
        "longitude": SUBJECT.1,
        "bedrooms": bedrooms,
        "bathrooms": bathrooms,
    })
    .to_string()
}

fn address_body() -> String {
    json!({
        "address": "123 Main St, Austin, TX",
        "bedrooms": 2,
        "bathrooms": 1.5,
    })
    .to_string()
}

fn a_and_b() -> Listings {
    Listings::Json(json!([
        listing_north("789 Far Rd, Austin, TX 78703", 2.1, 2200, 3, 2.0, Some(1100)),
        listing_north("456 Oak Ave, Austin, TX 78702", 1.4, 2450, 2, 2.0, Some(1025)),
    ]))
}

fn comp_addresses(body: &Value) -> Vec<String> {
    body["comps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["address"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn coordinates_return_ranked_comps() {
    let (service, calls) = test_service(Settings::default(), Ok(austin()), a_and_b());

    let resp = respond(post_json(COMPS, &coords_body(2, 1.5)), &service);
    assert_eq!(resp.status(), 200);
    let body = body_json(resp);

    assert_eq!(
        comp_addresses(&body),
        vec!["456 Oak Ave, Austin, TX 78702", "789 Far Rd, Austin, TX 78703"]
    );

    let first = &body["comps"][0];
    assert_eq!(first["price"], 2450);
    assert_eq!(first["bedrooms"], 2);
    assert_eq!(first["bathrooms"], 2.0);
    assert_eq!(first["square_footage"], 1025);
    assert_eq!(first["distance_miles"], 1.4);
    assert_eq!(body["comps"][1]["distance_miles"], 2.1);

    assert_eq!(
        body["input"],
        json!({
            "resolved_address": "Location at 30.2672, -97.7431",
            "latitude": 30.2672,
            "longitude": -97.7431,
            "bedrooms": 2,
            "bathrooms": 1.5,
            "radius_miles": 5.0,
            "days_old": "*:270",
        })
    );

    // no geocoding when coordinates are given
    assert!(calls.resolved.lock().unwrap().is_empty());
}

#[test]
fn address_is_geocoded_and_canonical_address_echoed() {
    let (service, calls) = test_service(Settings::default(), Ok(austin()), a_and_b());

    let resp = respond(post_json(COMPS, &address_body()), &service);
    assert_eq!(resp.status(), 200);
    let body = body_json(resp);

    assert_eq!(
        body["input"]["resolved_address"],
        "123 Main St, Austin, TX 78701, USA"
    );
    assert_eq!(
        *calls.resolved.lock().unwrap(),
        vec!["123 Main St, Austin, TX".to_string()]
    );
    assert_eq!(comp_addresses(&body).len(), 2);
}

#[test]
fn provider_receives_search_profile() {
    let settings = Settings {
        max_results: 3,
        rentcast_request_cap: 40,
        ..Settings::default()
    };
    let (service, calls) = test_service(settings, Ok(austin()), a_and_b());

    let body = json!({
        "latitude": SUBJECT.0,
        "longitude": SUBJECT.1,
        "bedrooms": 1,
        "bathrooms": 1.0,
        "radiusMiles": 2.5,
        "daysOld": "*:60",
    });
    let resp = respond(post_json(COMPS, &body.to_string()), &service);
    assert_eq!(resp.status(), 200);

    let fetched = calls.fetched.lock().unwrap();
    assert_eq!(fetched.len(), 1);
    let (criteria, limit_cap) = &fetched[0];
    assert_eq!(criteria.bedrooms, 1);
    assert_eq!(criteria.bathrooms, 1.0);
    assert_eq!(criteria.radius_miles, 2.5);
    assert_eq!(criteria.days_old, "*:60");
    assert_eq!(criteria.result_cap, 3);
    assert_eq!(*limit_cap, 40);
}

#[test]
fn shape_errors_are_422_before_any_collaborator() {
    let (service, calls) = test_service(Settings::default(), Ok(austin()), a_and_b());

    for body in [
        json!({"bedrooms": 2, "bathrooms": 1.5}).to_string(),
        json!({"address": "123 Main St, Austin, TX", "bedrooms": 2, "bathrooms": 1.25}).to_string(),
        json!({"address": "123 Main St, Austin, TX", "bathrooms": 1.5}).to_string(),
        json!({"address": "123 Main St, Austin, TX", "bedrooms": 2}).to_string(),
        "{not json".to_string(),
    ] {
        let resp = respond(post_json(COMPS, &body), &service);
        assert_eq!(resp.status(), 422, "{body}");
        assert_eq!(body_json(resp)["code"], "422_VALIDATION_ERROR");
    }

    assert!(calls.resolved.lock().unwrap().is_empty());
    assert!(calls.fetched.lock().unwrap().is_empty());
}

#[test]
fn malformed_address_is_400_without_geocoding() {
    let (service, calls) = test_service(Settings::default(), Ok(austin()), a_and_b());

    let body = json!({"address": "Main Street", "bedrooms": 2, "bathrooms": 1.5});
    let resp = respond(post_json(COMPS, &body.to_string()), &service);

    assert_eq!(resp.status(), 400);
    let body = body_json(resp);
    assert_eq!(body["code"], "400_INVALID_INPUT");
    assert_eq!(body["message"], "Invalid US address format");
    assert!(calls.resolved.lock().unwrap().is_empty());
}

#[test]
fn out_of_range_coordinates_are_400() {
    let (service, calls) = test_service(Settings::default(), Ok(austin()), a_and_b());

    let body = json!({"latitude": 95.0, "longitude": -97.7, "bedrooms": 2, "bathrooms": 1.5});
    let resp = respond(post_json(COMPS, &body.to_string()), &service);

    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["message"], "Invalid coordinates provided");
    assert!(calls.fetched.lock().unwrap().is_empty());
}

#[test]
fn geocoder_failures_map_to_distinct_codes() {
    let cases = [
        (ResolveError::NotFound, 400, "400_INVALID_INPUT"),
        (ResolveError::RateLimited, 429, "429_RATE_LIMITED"),
        (ResolveError::Timeout, 502, "502_PROVIDER_UNAVAILABLE"),
        (ResolveError::Http(500), 502, "502_PROVIDER_UNAVAILABLE"),
    ];

    for (err, status, code) in cases {
        let (service, calls) = test_service(Settings::default(), Err(err), a_and_b());

        let resp = respond(post_json(COMPS, &address_body()), &service);
        assert_eq!(resp.status(), status);
        assert_eq!(body_json(resp)["code"], code);
        assert!(calls.fetched.lock().unwrap().is_empty());
    }
}

#[test]
fn not_found_message_reaches_caller() {
    let (service, _) = test_service(Settings::default(), Err(ResolveError::NotFound), a_and_b());

    let resp = respond(post_json(COMPS, &address_body()), &service);
    let message = body_json(resp)["message"].as_str().unwrap().to_lowercase();
    assert!(message.contains("not found"));
}

#[test]
fn provider_failure_is_no_results_not_a_crash() {
    let (service, calls) = test_service(
        Settings::default(),
        Ok(austin()),
        Listings::Fail(|| ProviderError::RateLimited),
    );

    let resp = respond(post_json(COMPS, &coords_body(2, 1.5)), &service);

    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["code"], "404_NO_RESULTS");
    assert_eq!(calls.fetched.lock().unwrap().len(), 1);
}

#[test]
fn malformed_provider_payload_is_no_results() {
    let (service, _) = test_service(
        Settings::default(),
        Ok(austin()),
        Listings::Json(json!({"invalid": "response"})),
    );

    let resp = respond(post_json(COMPS, &coords_body(2, 1.5)), &service);
    assert_eq!(resp.status(), 404);
}

#[test]
fn only_invalid_listings_is_no_results() {
    let (service, _) = test_service(
        Settings::default(),
        Ok(austin()),
        Listings::Json(json!([
            {"formattedAddress": "1 No Price St", "latitude": 30.27, "longitude": -97.74, "bedrooms": 2, "bathrooms": 2},
            listing_north("2 Small St", 0.5, 1500, 1, 1.0, None),
        ])),
    );

    let resp = respond(post_json(COMPS, &coords_body(2, 1.5)), &service);
    assert_eq!(resp.status(), 404);
}

#[test]
fn mock_fallback_fills_empty_results() {
    let settings = Settings {
        mock_fallback: true,
        ..Settings::default()
    };
    let (service, _) = test_service(settings, Ok(austin()), Listings::Json(json!([])));

    let resp = respond(post_json(COMPS, &coords_body(3, 2.0)), &service);
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    let comps = body["comps"].as_array().unwrap();
    assert_eq!(comps.len(), 3);
    assert!(comps.iter().all(|c| c["bedrooms"] == 3 && c["bathrooms"] == 2.0));
}

#[test]
fn duplicates_and_extra_listings_are_trimmed() {
    let mut listings: Vec<Value> = (0..8)
        .map(|i| listing_north(&format!("{i} Cedar Ln, Austin, TX"), 0.5 + i as f64, 2000, 2, 2.0, None))
        .collect();
    listings.insert(1, listing_north("0 CEDAR LN, AUSTIN, TX", 0.1, 900, 2, 2.0, None));

    let (service, _) = test_service(Settings::default(), Ok(austin()), Listings::Json(Value::Array(listings)));

    let body = body_json(respond(post_json(COMPS, &coords_body(2, 1.5)), &service));
    let addresses = comp_addresses(&body);

    assert_eq!(addresses.len(), 5);
    assert_eq!(addresses[0], "0 Cedar Ln, Austin, TX");
    assert!(!addresses.iter().any(|a| a == "0 CEDAR LN, AUSTIN, TX"));
}
