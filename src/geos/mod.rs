mod coordinate;
mod distance;

pub use coordinate::Coordinate;
