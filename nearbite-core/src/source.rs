//! Input-source traits for the session.
//!
//! The catalog and the user's position arrive from outside the core:
//! `CatalogSource` is implemented by storage adapters (see the
//! `nearbite-catalog` crate) and `PositionSource` by whatever platform
//! geolocation is available. Both resolve exactly once per session; failures
//! are explicit values, never panics escaping into core logic.

use geo::Coord;
use thiserror::Error;

use crate::place::Restaurant;

/// Why the catalog could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The backing store failed to produce records.
    #[error("catalog unavailable: {reason}")]
    Unavailable {
        /// Human-readable description from the adapter.
        reason: String,
    },
}

/// Why no position is available, mirroring the reason classes of browser
/// geolocation. The session treats every variant uniformly as "no position";
/// the distinction exists so callers can explain the degradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The platform offers no geolocation at all.
    #[error("geolocation is not supported on this platform")]
    Unsupported,
    /// The user declined the position request.
    #[error("permission to read the position was denied")]
    PermissionDenied,
    /// The platform could not determine a position.
    #[error("position is currently unavailable")]
    Unavailable,
    /// The position request timed out.
    #[error("timed out waiting for a position")]
    TimedOut,
}

/// Read-only access to the restaurant catalog.
///
/// # Examples
/// ```
/// use nearbite_core::{CatalogError, CatalogSource, Restaurant};
///
/// struct Empty;
///
/// impl CatalogSource for Empty {
///     fn load(&self) -> Result<Vec<Restaurant>, CatalogError> {
///         Ok(Vec::new())
///     }
/// }
///
/// assert!(Empty.load().unwrap().is_empty());
/// ```
pub trait CatalogSource {
    /// Load every restaurant record, or report why none are available.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the backing store cannot be read.
    fn load(&self) -> Result<Vec<Restaurant>, CatalogError>;
}

/// One-shot access to the user's current coordinates.
pub trait PositionSource {
    /// Resolve the current position (`x = longitude`, `y = latitude`).
    ///
    /// # Errors
    /// Returns [`PositionError`] describing why no position is available.
    fn current_position(&self) -> Result<Coord<f64>, PositionError>;
}
