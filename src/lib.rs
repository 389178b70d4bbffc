//! Facade crate for the nearbite restaurant discovery engine.
//!
//! This crate re-exports the core domain types and exposes the JSON catalog
//! store and place-lookup client behind the `catalog` feature flag.

#![forbid(unsafe_code)]

pub use nearbite_core::{
    CatalogError, CatalogSource, CatalogState, DayTime, DayTimeError, FilterConfig,
    NearbyRestaurant, OpeningPeriod, PositionError, PositionSource, PositionState, PriceTier,
    Restaurant, Session, distance_km, is_open, pick_random,
};

#[cfg(feature = "catalog")]
pub use nearbite_catalog::{CatalogFileError, GooglePlaces, JsonCatalog, PlaceLookup};
