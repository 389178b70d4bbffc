//! Property-based tests for the great-circle distance function.
//!
//! These use `proptest` to assert invariants that must hold for all valid
//! coordinate pairs, complementing the fixed-point regression tests in the
//! module itself.
//!
//! # Invariants tested
//!
//! - **Symmetry:** `distance_km(a, b) == distance_km(b, a)`.
//! - **Identity:** `distance_km(a, a)` is (approximately) zero.
//! - **Non-negativity and finiteness** for every input.

use geo::Coord;
use nearbite_core::distance_km;
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = Coord<f64>> {
    // Keep away from the poles, where longitude degenerates.
    (-180.0..180.0f64, -85.0..85.0f64).prop_map(|(x, y)| Coord { x, y })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn distance_is_symmetric(a in coord(), b in coord()) {
        let forward = distance_km(a, b);
        let backward = distance_km(b, a);
        prop_assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero(a in coord()) {
        prop_assert!(distance_km(a, a).abs() < 1e-9);
    }

    #[test]
    fn distance_is_finite_and_non_negative(a in coord(), b in coord()) {
        let d = distance_km(a, b);
        prop_assert!(d.is_finite());
        prop_assert!(d >= 0.0);
        // No two points on a sphere of mean radius 6371 km are further
        // apart than half its circumference.
        prop_assert!(d <= 20_100.0);
    }
}
