//! The reactive session: inputs in, derived lists out.
//!
//! A [`Session`] holds the three inputs (catalog, position and filter
//! criteria) and owns *when* the derived lists are recomputed, never *how*:
//! the distance, hours, filter and sampling logic live in their own modules.
//! Every recomputation rebuilds the derived lists from scratch and discards
//! the previous ones; nothing is patched in place.
//!
//! The catalog and position each resolve exactly once, asynchronously and in
//! either order. The session tolerates either resolving first, last or not
//! at all, and recomputes from scratch if a position arrives after an
//! earlier failure.

use geo::Coord;
use rand::Rng;

use crate::distance::distance_km;
use crate::filter::{self, FilterConfig};
use crate::hours::DayTime;
use crate::place::{NearbyRestaurant, Restaurant};
use crate::sampler::pick_random;
use crate::source::{CatalogError, PositionError};

/// Lifecycle of the catalog input.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogState {
    /// The fetch has not resolved yet.
    #[default]
    Pending,
    /// Records loaded and held read-only for the session.
    Ready(Vec<Restaurant>),
    /// The fetch failed; not retried within the session.
    Unavailable(CatalogError),
}

/// Lifecycle of the position input.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PositionState {
    /// The position request has not resolved yet.
    #[default]
    Pending,
    /// A usable coordinate pair.
    Available(Coord<f64>),
    /// The request failed; distance filtering is disabled.
    Unavailable(PositionError),
}

/// A browsing session over the restaurant catalog.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearbite_core::{DayTime, FilterConfig, Restaurant, Session};
///
/// let mut session = Session::new();
/// let now = DayTime { day: 1, time: 1200 };
/// let catalog = vec![Restaurant::new(1, "Lan Jia", "Taiwanese", Coord { x: 121.53, y: 25.01 })];
/// session.resolve_catalog(Ok(catalog), now);
/// session.resolve_position(Ok(Coord { x: 121.54, y: 25.02 }), now);
/// assert_eq!(session.matches().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Session {
    catalog: CatalogState,
    position: PositionState,
    filters: FilterConfig,
    nearby: Vec<NearbyRestaurant>,
    matches: Vec<NearbyRestaurant>,
    picks: Vec<NearbyRestaurant>,
}

impl Session {
    /// Create a session with both inputs pending and default filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session starting from the given filter criteria.
    pub fn with_filters(filters: FilterConfig) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Feed the catalog fetch outcome into the session.
    ///
    /// Recomputes the annotated and filtered lists against the timestamp
    /// `now`.
    pub fn resolve_catalog(
        &mut self,
        outcome: Result<Vec<Restaurant>, CatalogError>,
        now: DayTime,
    ) {
        self.catalog = match outcome {
            Ok(records) => CatalogState::Ready(records),
            Err(error) => CatalogState::Unavailable(error),
        };
        self.refresh_nearby(now);
    }

    /// Feed the position request outcome into the session.
    ///
    /// A successful position arriving after an earlier failure replaces it
    /// and triggers a full recomputation.
    pub fn resolve_position(
        &mut self,
        outcome: Result<Coord<f64>, PositionError>,
        now: DayTime,
    ) {
        self.position = match outcome {
            Ok(position) => PositionState::Available(position),
            Err(error) => PositionState::Unavailable(error),
        };
        self.refresh_nearby(now);
    }

    /// Replace the filter criteria and recompute the filtered list.
    ///
    /// The catalog and the annotated distances are untouched.
    pub fn set_filters(&mut self, filters: FilterConfig, now: DayTime) {
        self.filters = filters;
        self.refresh_matches(now);
    }

    /// Draw up to `k` random picks.
    ///
    /// The source list is the current filtered list when it is non-empty,
    /// otherwise the full annotated catalog; that fallback is part of the
    /// feature's contract. Previous picks are replaced wholesale.
    pub fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R, k: usize) -> &[NearbyRestaurant] {
        let source = if self.matches.is_empty() {
            &self.nearby
        } else {
            &self.matches
        };
        let picks = pick_random(rng, source, k);
        self.picks = picks;
        &self.picks
    }

    /// The full catalog annotated with distances, sorted nearest-first when
    /// a position is available and in catalog order otherwise.
    pub fn nearby(&self) -> &[NearbyRestaurant] {
        &self.nearby
    }

    /// The filtered result list. Empty is a valid outcome.
    pub fn matches(&self) -> &[NearbyRestaurant] {
        &self.matches
    }

    /// The current random picks; cleared whenever the filtered list is
    /// recomputed, so stale picks never outlive a filter change.
    pub fn picks(&self) -> &[NearbyRestaurant] {
        &self.picks
    }

    /// The active filter criteria.
    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    /// Current position, if one resolved successfully.
    pub fn position(&self) -> Option<Coord<f64>> {
        match self.position {
            PositionState::Available(position) => Some(position),
            _ => None,
        }
    }

    /// Whether the catalog fetch is still outstanding.
    pub fn catalog_pending(&self) -> bool {
        matches!(self.catalog, CatalogState::Pending)
    }

    /// Whether the position request is still outstanding.
    pub fn position_pending(&self) -> bool {
        matches!(self.position, PositionState::Pending)
    }

    /// Whether either input is still outstanding. Callers should surface a
    /// loading state rather than present partial data as complete.
    pub fn is_loading(&self) -> bool {
        self.catalog_pending() || self.position_pending()
    }

    /// Why the catalog is unavailable, if its fetch failed.
    pub fn catalog_error(&self) -> Option<&CatalogError> {
        match &self.catalog {
            CatalogState::Unavailable(error) => Some(error),
            _ => None,
        }
    }

    /// Why no position is available, if the request failed.
    pub fn position_error(&self) -> Option<PositionError> {
        match self.position {
            PositionState::Unavailable(error) => Some(error),
            _ => None,
        }
    }

    /// Rebuild the annotated list from the current catalog and position,
    /// then the filtered list from it.
    fn refresh_nearby(&mut self, now: DayTime) {
        let position = self.position();
        let records: &[Restaurant] = match &self.catalog {
            CatalogState::Ready(records) => records,
            _ => &[],
        };
        self.nearby = records
            .iter()
            .map(|restaurant| NearbyRestaurant {
                distance_km: position.map_or(0.0, |p| distance_km(p, restaurant.location)),
                restaurant: restaurant.clone(),
            })
            .collect();
        if position.is_some() {
            self.nearby
                .sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        }
        self.refresh_matches(now);
    }

    /// Rebuild the filtered list and invalidate any displayed picks.
    fn refresh_matches(&mut self, now: DayTime) {
        let position_available = self.position().is_some();
        self.matches = filter::apply(&self.nearby, &self.filters, position_available, now);
        self.picks.clear();
    }
}
