//! Raw catalog-file records and their conversion into core types.
//!
//! The on-disk shape mirrors what the Google Places API returns: flat
//! latitude/longitude fields, a 1–3 `priceRange`, and opening periods as an
//! open boundary with an optional close boundary and an `"HHMM"` time
//! string. Conversion is where that optional close boundary is classified
//! into the three explicit [`OpeningPeriod`] variants.

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nearbite_core::{DayTime, DayTimeError, OpeningPeriod, PriceTier, PriceTierError, Restaurant};

/// A restaurant as stored in the catalog JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Cuisine label.
    pub cuisine: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Price bracket, `1..=3`.
    #[serde(rename = "priceRange")]
    pub price_range: u8,
    /// Aggregate rating; some listings carry none.
    #[serde(default)]
    pub rating: f32,
    /// Link to the maps listing.
    #[serde(rename = "googleMapsUrl")]
    pub google_maps_url: String,
    /// Weekly opening periods; older entries may omit the key entirely.
    #[serde(rename = "openingHours", default, skip_serializing_if = "Vec::is_empty")]
    pub opening_hours: Vec<PeriodRecord>,
}

/// One raw opening period: an open boundary and an optional close boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// When the period starts.
    pub open: TimeBoundary,
    /// When the period ends; absent for the always-open sentinel and for
    /// incomplete data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<TimeBoundary>,
}

/// A day-of-week plus an `"HHMM"` time string, as the API encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBoundary {
    /// Day of week, `0..=6` with `0 = Sunday`.
    pub day: u8,
    /// Clock time as a four-digit string, e.g. `"1430"`.
    pub time: String,
}

/// Errors from converting raw records into core types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The price bracket was outside `1..=3`.
    #[error(transparent)]
    InvalidPrice(#[from] PriceTierError),
    /// A boundary's day or decoded time was out of range.
    #[error(transparent)]
    InvalidBoundary(#[from] DayTimeError),
    /// A boundary's time string was not a number.
    #[error("opening period time {raw:?} is not an HHMM value")]
    UnparsableTime {
        /// The offending time string.
        raw: String,
    },
}

impl TimeBoundary {
    fn to_day_time(&self) -> Result<DayTime, RecordError> {
        let time: u16 = self
            .time
            .parse()
            .map_err(|_| RecordError::UnparsableTime {
                raw: self.time.clone(),
            })?;
        Ok(DayTime::new(self.day, time)?)
    }

    fn from_day_time(value: DayTime) -> Self {
        Self {
            day: value.day,
            time: format!("{:04}", value.time),
        }
    }
}

impl PeriodRecord {
    /// Classify the raw period into an explicit [`OpeningPeriod`] variant.
    ///
    /// An open boundary of day 0 at `"0000"` with no close boundary is the
    /// always-open sentinel; any other period without a close boundary is
    /// incomplete data, preserved as such rather than rejected.
    ///
    /// # Errors
    /// Returns [`RecordError`] when a boundary cannot be decoded at all.
    pub fn classify(&self) -> Result<OpeningPeriod, RecordError> {
        let open = self.open.to_day_time()?;
        match &self.close {
            None if open.day == 0 && open.time == 0 => Ok(OpeningPeriod::AlwaysOpen),
            None => Ok(OpeningPeriod::Incomplete { open }),
            Some(close) => Ok(OpeningPeriod::Window {
                open,
                close: close.to_day_time()?,
            }),
        }
    }

    fn from_period(period: &OpeningPeriod) -> Self {
        match *period {
            OpeningPeriod::AlwaysOpen => Self {
                open: TimeBoundary {
                    day: 0,
                    time: "0000".into(),
                },
                close: None,
            },
            OpeningPeriod::Incomplete { open } => Self {
                open: TimeBoundary::from_day_time(open),
                close: None,
            },
            OpeningPeriod::Window { open, close } => Self {
                open: TimeBoundary::from_day_time(open),
                close: Some(TimeBoundary::from_day_time(close)),
            },
        }
    }
}

impl RestaurantRecord {
    /// Convert the raw record into a core [`Restaurant`].
    ///
    /// Periods that cannot be decoded are skipped with a warning; they never
    /// fail the whole record.
    ///
    /// # Errors
    /// Returns [`RecordError`] when the price bracket is invalid.
    pub fn into_restaurant(self) -> Result<Restaurant, RecordError> {
        let price = PriceTier::try_from(self.price_range)?;
        let mut hours = Vec::with_capacity(self.opening_hours.len());
        for raw in &self.opening_hours {
            match raw.classify() {
                Ok(period) => hours.push(period),
                Err(error) => log::warn!(
                    "catalog record {} ({}): skipping opening period: {error}",
                    self.id,
                    self.name
                ),
            }
        }
        Ok(Restaurant::new(
            self.id,
            self.name,
            self.cuisine,
            Coord {
                x: self.longitude,
                y: self.latitude,
            },
        )
        .with_price(price)
        .with_rating(self.rating)
        .with_maps_url(self.google_maps_url)
        .with_hours(hours))
    }

    /// Build a raw record from a core [`Restaurant`].
    pub fn from_restaurant(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name.clone(),
            cuisine: restaurant.cuisine.clone(),
            latitude: restaurant.location.y,
            longitude: restaurant.location.x,
            price_range: restaurant.price.into(),
            rating: restaurant.rating,
            google_maps_url: restaurant.maps_url.clone(),
            opening_hours: restaurant.hours.iter().map(PeriodRecord::from_period).collect(),
        }
    }
}
