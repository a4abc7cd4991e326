//! Catalogue records and the read-only store the engine works over

pub mod error;
pub mod record;
pub mod store;

pub use error::CatalogError;
pub use record::{study_hours_for_tier, Record, MAX_TIER};
pub use store::RecordStore;
