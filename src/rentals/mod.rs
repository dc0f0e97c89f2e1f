mod mock;
mod models;
mod normalizer;
mod provider;
mod provider_error;
mod selector;

pub use mock::mock_comps;
pub use models::RawListing;
pub use normalizer::{normalize, Rejection};
pub use provider::{ListingProvider, ProviderOutcome, RentcastClient};
#[cfg(test)]
pub use provider::parse_listings;
pub use provider_error::ProviderError;
pub use selector::select_outcome;
