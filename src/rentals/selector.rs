// src/rentals/selector.rs

use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;

use tracing::Level;

use crate::domain::{ComparableProperty, SearchCriteria};
use crate::rentals::{normalize, ProviderOutcome, RawListing, Rejection};

/// Reduces raw provider listings to the ranked comps for `criteria`.
///
/// Normalizes in provider order, keeps the first listing per address
/// (case-insensitive), sorts by distance asc, price asc and square footage
/// desc, then truncates to the result cap. Never fails; bad input just means
/// fewer comps.
pub fn select(raw_listings: &[RawListing], criteria: &SearchCriteria) -> Vec<ComparableProperty> {
    let mut seen = HashSet::new();
    let mut rejected = 0usize;

    let mut comps: Vec<ComparableProperty> = raw_listings
        .iter()
        .filter_map(|raw| {
            match normalize(raw, &criteria.subject, criteria.bedrooms, criteria.bathrooms) {
                Ok(comp) => Some(comp),
                Err(rejection) => {
                    log_rejection(&rejection);
                    rejected += 1;
                    None
                }
            }
        })
        .filter(|comp| within_bedroom_ceiling(comp, criteria))
        .filter(|comp| seen.insert(comp.address_key()))
        .collect();

    // sort_by is stable: full ties keep provider order
    comps.sort_by(rank);
    comps.truncate(criteria.result_cap);

    tracing::debug!(
        received = raw_listings.len(),
        rejected,
        selected = comps.len(),
        "comps selected"
    );

    comps
}

/// Selector entry point for a tagged provider outcome.
///
/// A provider failure collapses to an empty comp list; the caller decides
/// what an empty result means.
pub fn select_outcome(outcome: ProviderOutcome, criteria: &SearchCriteria) -> Vec<ComparableProperty> {
    match outcome {
        ProviderOutcome::Listings(listings) => select(&listings, criteria),
        ProviderOutcome::Failure(e) => {
            tracing::warn!(error = %e, "listing provider failed, returning no comps");
            Vec::new()
        }
    }
}

fn rank(a: &ComparableProperty, b: &ComparableProperty) -> Ordering {
    a.distance_miles
        .total_cmp(&b.distance_miles)
        .then_with(|| a.price.cmp(&b.price))
        .then_with(|| Reverse(a.sqft_for_ranking()).cmp(&Reverse(b.sqft_for_ranking())))
}

fn within_bedroom_ceiling(comp: &ComparableProperty, criteria: &SearchCriteria) -> bool {
    match criteria.max_bedroom_surplus {
        Some(surplus) => comp.bedrooms <= criteria.bedrooms.saturating_add(surplus),
        None => true,
    }
}

/// Malformed values are worth a warning; ordinary filtering is not.
fn rejection_level(rejection: &Rejection) -> Level {
    match rejection {
        Rejection::Coercion { .. } => Level::WARN,
        _ => Level::DEBUG,
    }
}

fn log_rejection(rejection: &Rejection) {
    if rejection_level(rejection) == Level::WARN {
        tracing::warn!(reason = %rejection, "error processing listing")
    } else {
        tracing::debug!(reason = %rejection, "listing filtered out")
    }
}
