//! Core domain logic for the nearbite restaurant discovery engine.
//!
//! The crate is organised as four pure components and one orchestrator:
//! great-circle distance ([`distance_km`]), the weekly opening-hours
//! evaluator ([`is_open`]), the multi-predicate filter pipeline
//! ([`filter::apply`]), the no-replacement random sampler ([`pick_random`])
//! and the [`Session`] that sequences their recomputation whenever the
//! catalog, the position or the filter criteria change.
//!
//! Nothing here performs I/O or reads the wall clock; catalog and position
//! adapters implement the traits in [`source`], and timestamps are passed in
//! as [`DayTime`] values.

#![forbid(unsafe_code)]

pub mod distance;
pub mod filter;
pub mod hours;
pub mod place;
pub mod sampler;
pub mod session;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::distance_km;
pub use filter::{DEFAULT_MAX_DISTANCE_KM, FilterConfig};
pub use hours::{DayTime, DayTimeError, OpeningPeriod, is_open};
pub use place::{NearbyRestaurant, PriceTier, PriceTierError, Restaurant};
pub use sampler::{DEFAULT_PICK_COUNT, pick_random};
pub use session::{CatalogState, PositionState, Session};
pub use source::{CatalogError, CatalogSource, PositionError, PositionSource};
