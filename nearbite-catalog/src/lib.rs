//! Catalog storage and editing for the nearbite engine.
//!
//! Two concerns live here, both outside the pure core:
//! - **Serving the session:** [`JsonCatalog`] reads the catalog file and
//!   implements [`CatalogSource`](nearbite_core::CatalogSource).
//! - **Editing the catalog:** [`PlaceLookup`] resolves a place name or maps
//!   URL through a place directory, and [`JsonCatalog::append`] validates,
//!   de-duplicates and persists the result with a fresh id.

#![forbid(unsafe_code)]

mod file;
mod places;
pub mod record;

pub use file::{AppendOutcome, CatalogFileError, JsonCatalog};
pub use places::{GooglePlaces, PlaceDetails, PlaceLookup, PlaceLookupError, place_name_from_url};
