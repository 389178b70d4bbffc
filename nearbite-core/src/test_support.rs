//! Test-only sources and record builders used by unit and behaviour tests.

use geo::Coord;

use crate::place::{NearbyRestaurant, Restaurant};
use crate::source::{CatalogError, CatalogSource, PositionError, PositionSource};

/// A restaurant at an explicit longitude/latitude.
pub fn restaurant_at(id: u64, name: &str, cuisine: &str, lon: f64, lat: f64) -> Restaurant {
    Restaurant::new(id, name, cuisine, Coord { x: lon, y: lat })
}

/// A pre-annotated record, for exercising the filter pipeline directly.
pub fn nearby(id: u64, name: &str, cuisine: &str, distance_km: f64) -> NearbyRestaurant {
    NearbyRestaurant {
        restaurant: restaurant_at(id, name, cuisine, 0.0, 0.0),
        distance_km,
    }
}

/// A position in Taipei's Gongguan district used across the test fixtures.
pub fn user_position() -> Coord<f64> {
    Coord {
        x: 121.5398,
        y: 25.0174,
    }
}

/// In-memory [`CatalogSource`] performing no I/O.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
    records: Vec<Restaurant>,
}

impl StaticCatalog {
    /// Create a source returning the given records.
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Restaurant>,
    {
        Self {
            records: records.into_iter().collect(),
        }
    }
}

impl CatalogSource for StaticCatalog {
    fn load(&self) -> Result<Vec<Restaurant>, CatalogError> {
        Ok(self.records.clone())
    }
}

/// [`PositionSource`] returning a fixed coordinate pair.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coord<f64>);

impl PositionSource for FixedPosition {
    fn current_position(&self) -> Result<Coord<f64>, PositionError> {
        Ok(self.0)
    }
}

/// [`PositionSource`] that always fails with the given reason.
#[derive(Debug, Clone, Copy)]
pub struct FailingPosition(pub PositionError);

impl PositionSource for FailingPosition {
    fn current_position(&self) -> Result<Coord<f64>, PositionError> {
        Err(self.0)
    }
}
