//! nextstep-catalog
//!
//! Loads the help-resource catalog from JSON, validates it into an immutable
//! [`Catalog`] snapshot and publishes snapshots through a [`CatalogHandle`]
//! that swaps them whole.

pub mod catalog;
pub mod loader;

pub use catalog::{Catalog, CatalogHandle};
pub use loader::{load_catalog, CatalogLoader, RawRecord};
