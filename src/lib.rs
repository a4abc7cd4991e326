//! langfinder: filter and fuzzy-search engine over a static language catalogue
//!
//! - `catalog`: record model and the immutable, versioned record store
//! - `filter`: option bounds, filter state and the record predicate
//! - `search`: tiered field matching and weighted relevance ranking
//! - `suggest`: typeahead suggestions with occurrence counts
//! - `session`: one store snapshot bound to filters, search and suggestions
//! - `debounce`: cancel-on-supersede evaluation of rapidly changing queries

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod search;
pub mod session;
pub mod suggest;

pub use catalog::{CatalogError, Record, RecordStore};
pub use config::EngineConfig;
pub use debounce::{Debouncer, Settled};
pub use error::AppError;
pub use filter::{FilterBounds, FilterState, NumericRange};
pub use search::{SearchEngine, SearchResult};
pub use session::{CatalogEngine, QueryOutcome};
pub use suggest::{Suggestion, SuggestionGenerator, SuggestionKind};
