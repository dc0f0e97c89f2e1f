mod geocode_error;
mod models;
mod resolver;

pub use geocode_error::ResolveError;
pub use resolver::{LocationResolver, OpenCageResolver, ResolvedLocation};
