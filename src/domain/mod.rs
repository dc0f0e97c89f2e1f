pub mod comp;
pub mod criteria;

pub use comp::ComparableProperty;
pub use criteria::SearchCriteria;
