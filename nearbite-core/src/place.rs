//! Restaurant records and the distance-annotated view used for ranking.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching
//! the `geo` crate's axis convention.

use geo::Coord;
use thiserror::Error;

use crate::hours::OpeningPeriod;

/// Price bracket for a restaurant, ordered from cheapest to priciest.
///
/// Serialised as the integers `1`, `2` and `3` to match the catalog file
/// format.
///
/// # Examples
/// ```
/// use nearbite_core::PriceTier;
///
/// assert!(PriceTier::Budget < PriceTier::Upscale);
/// assert_eq!(u8::from(PriceTier::Moderate), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum PriceTier {
    /// Everyday, inexpensive meals.
    Budget,
    /// Mid-range dining.
    Moderate,
    /// High-end dining.
    Upscale,
}

/// Error returned when a raw price value is outside `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("price tier must be 1, 2 or 3, got {0}")]
pub struct PriceTierError(pub u8);

impl TryFrom<u8> for PriceTier {
    type Error = PriceTierError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Budget),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::Upscale),
            other => Err(PriceTierError(other)),
        }
    }
}

impl From<PriceTier> for u8 {
    fn from(tier: PriceTier) -> Self {
        match tier {
            PriceTier::Budget => 1,
            PriceTier::Moderate => 2,
            PriceTier::Upscale => 3,
        }
    }
}

/// A restaurant in the session catalog.
///
/// Records are immutable once loaded; the catalog editor is the only writer
/// and guarantees id uniqueness before a record reaches this type.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearbite_core::{PriceTier, Restaurant};
///
/// let r = Restaurant::new(1, "Lan Jia", "Taiwanese", Coord { x: 121.53, y: 25.01 })
///     .with_price(PriceTier::Budget)
///     .with_rating(4.4);
/// assert_eq!(r.id, 1);
/// assert_eq!(r.price, PriceTier::Budget);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restaurant {
    /// Unique identifier assigned by the catalog editor.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Cuisine label used alongside the name for text search.
    pub cuisine: String,
    /// Geospatial position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Price bracket.
    pub price: PriceTier,
    /// Aggregate rating, typically `0.0..=5.0`.
    pub rating: f32,
    /// Link back to the maps listing the record was sourced from.
    pub maps_url: String,
    /// Weekly opening periods; empty when the listing carries no hours.
    pub hours: Vec<OpeningPeriod>,
}

impl Restaurant {
    /// Construct a restaurant with defaults for the optional attributes.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        cuisine: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cuisine: cuisine.into(),
            location,
            price: PriceTier::Moderate,
            rating: 0.0,
            maps_url: String::new(),
            hours: Vec::new(),
        }
    }

    /// Set the price bracket.
    #[must_use]
    pub fn with_price(mut self, price: PriceTier) -> Self {
        self.price = price;
        self
    }

    /// Set the aggregate rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    /// Set the maps listing URL.
    #[must_use]
    pub fn with_maps_url(mut self, url: impl Into<String>) -> Self {
        self.maps_url = url.into();
        self
    }

    /// Set the weekly opening periods.
    #[must_use]
    pub fn with_hours(mut self, hours: Vec<OpeningPeriod>) -> Self {
        self.hours = hours;
        self
    }
}

/// A [`Restaurant`] annotated with its distance from the session position.
///
/// `distance_km` is `0.0` and carries no meaning when the session has no
/// position; callers must not read a zero as "nearby" in that case.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbyRestaurant {
    /// The underlying catalog record.
    pub restaurant: Restaurant,
    /// Great-circle distance from the session position, in kilometres.
    pub distance_km: f64,
}
