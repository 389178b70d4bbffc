//! Multi-predicate filtering over distance-annotated restaurants.
//!
//! The pipeline is a pure conjunction of independent predicates. It keeps
//! the input ordering, so the session is responsible for sorting the records
//! by distance before filtering. An empty result is a valid outcome, not an
//! error.

use crate::hours::{DayTime, is_open};
use crate::place::{NearbyRestaurant, PriceTier};

/// Default distance cap in kilometres when the caller supplies none.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 5.0;

/// Filter criteria for a session's result list.
///
/// `None` selectors mean "no constraint". The query is matched
/// case-insensitively after trimming, against both name and cuisine.
///
/// # Examples
/// ```
/// use nearbite_core::FilterConfig;
///
/// let cfg = FilterConfig {
///     query: "ramen".into(),
///     open_now: true,
///     ..FilterConfig::default()
/// };
/// assert!(cfg.price.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    /// Free-text query over name and cuisine; empty matches everything.
    pub query: String,
    /// Exact price bracket, or `None` for any.
    pub price: Option<PriceTier>,
    /// Minimum rating threshold, or `None` for any.
    pub min_rating: Option<f32>,
    /// Maximum distance in kilometres; only applied when the session has a
    /// position.
    pub max_distance_km: f64,
    /// Keep only restaurants open at the query timestamp.
    pub open_now: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            price: None,
            min_rating: None,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            open_now: false,
        }
    }
}

/// Apply the filter criteria to a pre-sorted record list.
///
/// Predicates short-circuit cheapest-first; the surviving records keep their
/// input order. The distance cap is skipped entirely when
/// `position_available` is false, so records without a meaningful distance
/// are never excluded by it.
pub fn apply(
    records: &[NearbyRestaurant],
    cfg: &FilterConfig,
    position_available: bool,
    now: DayTime,
) -> Vec<NearbyRestaurant> {
    let query = cfg.query.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            let r = &record.restaurant;
            cfg.price.is_none_or(|tier| r.price == tier)
                && cfg.min_rating.is_none_or(|min| r.rating >= min)
                && (!position_available || record.distance_km <= cfg.max_distance_km)
                && (query.is_empty()
                    || r.name.to_lowercase().contains(&query)
                    || r.cuisine.to_lowercase().contains(&query))
                && (!cfg.open_now || is_open(&r.hours, now))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hours::OpeningPeriod;
    use crate::test_support::nearby;
    use rstest::rstest;

    fn noon_monday() -> DayTime {
        DayTime { day: 1, time: 1200 }
    }

    fn sample() -> Vec<NearbyRestaurant> {
        vec![
            nearby(1, "Lan Jia Gua Bao", "Taiwanese", 0.4),
            nearby(2, "Menya Ramen", "Japanese", 1.2),
            nearby(3, "Casa Pasta", "Italian", 2.8),
        ]
    }

    #[rstest]
    fn no_constraints_return_input_unchanged() {
        let records = sample();
        let out = apply(&records, &FilterConfig::default(), true, noon_monday());
        assert_eq!(out, records);
    }

    #[rstest]
    #[case("ramen", &[2])]
    #[case("  RAMEN  ", &[2])] // trimmed, case-insensitive
    #[case("taiwanese", &[1])] // cuisine matches too
    #[case("a", &[1, 2, 3])]
    #[case("nothing here", &[])]
    fn query_matches_name_or_cuisine(#[case] query: &str, #[case] expected: &[u64]) {
        let records = sample();
        let cfg = FilterConfig {
            query: query.into(),
            ..FilterConfig::default()
        };
        let ids: Vec<u64> = apply(&records, &cfg, true, noon_monday())
            .into_iter()
            .map(|r| r.restaurant.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    fn price_filter_is_exact_match() {
        let mut records = sample();
        records[1].restaurant.price = PriceTier::Upscale;
        let cfg = FilterConfig {
            price: Some(PriceTier::Upscale),
            ..FilterConfig::default()
        };
        let out = apply(&records, &cfg, true, noon_monday());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].restaurant.id, 2);
    }

    #[rstest]
    fn rating_filter_keeps_threshold_and_above() {
        let mut records = sample();
        records[0].restaurant.rating = 4.5;
        records[1].restaurant.rating = 4.0;
        records[2].restaurant.rating = 3.2;
        let cfg = FilterConfig {
            min_rating: Some(4.0),
            ..FilterConfig::default()
        };
        let ids: Vec<u64> = apply(&records, &cfg, true, noon_monday())
            .into_iter()
            .map(|r| r.restaurant.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    fn distance_cap_applies_only_with_position() {
        let records = sample();
        let cfg = FilterConfig {
            max_distance_km: 1.0,
            ..FilterConfig::default()
        };
        let with_position = apply(&records, &cfg, true, noon_monday());
        assert_eq!(with_position.len(), 1);
        assert_eq!(with_position[0].restaurant.id, 1);

        // Without a position the cap is skipped, not failed.
        let without_position = apply(&records, &cfg, false, noon_monday());
        assert_eq!(without_position.len(), 3);
    }

    #[rstest]
    fn open_now_keeps_only_open_schedules() {
        let mut records = sample();
        records[2].restaurant.hours = vec![OpeningPeriod::AlwaysOpen];
        let cfg = FilterConfig {
            open_now: true,
            ..FilterConfig::default()
        };
        let out = apply(&records, &cfg, true, noon_monday());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].restaurant.id, 3);
    }
}
