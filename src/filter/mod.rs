//! Filtering: option bounds, filter state, and the record predicate

pub mod bounds;
pub mod evaluator;
pub mod range;
pub mod state;


pub use bounds::FilterBounds;
pub use evaluator::evaluate;
pub use range::NumericRange;
pub use state::{FilterManager, FilterState};
