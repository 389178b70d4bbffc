//! Great-circle distance between coordinates.

use geo::{Distance, Haversine, Point};

/// Compute the great-circle distance between two WGS84 coordinates, in
/// kilometres.
///
/// Uses the haversine formula on a spherical-Earth approximation (mean
/// radius ≈ 6371 km). The function is total and symmetric:
/// `distance_km(a, b) == distance_km(b, a)` within floating-point tolerance
/// and `distance_km(a, a) == 0.0`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearbite_core::distance_km;
///
/// // Gongguan to Zhongxiao Fuxing, Taipei: roughly 3.1 km.
/// let a = Coord { x: 121.5398, y: 25.0174 };
/// let b = Coord { x: 121.5654, y: 25.0330 };
/// assert!((distance_km(a, b) - 3.1).abs() < 0.2);
/// ```
pub fn distance_km(a: geo::Coord<f64>, b: geo::Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b)) / 1000.0
}
