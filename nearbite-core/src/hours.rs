//! Weekly opening hours and the open/closed evaluator.
//!
//! A schedule is a sequence of [`OpeningPeriod`] values. The evaluator is a
//! pure predicate over `(schedule, timestamp)`: it never reads the wall
//! clock, so tests can probe arbitrary day/time combinations. Callers that
//! want "now" convert a [`chrono::DateTime`] with [`DayTime::from_datetime`].

use chrono::{Datelike, Timelike};
use thiserror::Error;

/// A point in the week: a day of week and a 24-hour clock time.
///
/// `day` runs `0..=6` with `0 = Sunday`, matching both the catalog file
/// format and `chrono`'s `num_days_from_sunday`. `time` encodes the clock
/// reading as `HHMM`, e.g. `1430` for 14:30.
///
/// # Examples
/// ```
/// use nearbite_core::DayTime;
///
/// let noon_monday = DayTime::new(1, 1200)?;
/// assert_eq!(noon_monday.day, 1);
/// # Ok::<(), nearbite_core::DayTimeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayTime {
    /// Day of week, `0..=6` with `0 = Sunday`.
    pub day: u8,
    /// Clock time encoded as `HHMM`.
    pub time: u16,
}

/// Errors returned by [`DayTime::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DayTimeError {
    /// The day of week was outside `0..=6`.
    #[error("day of week must be 0..=6, got {0}")]
    InvalidDay(u8),
    /// The encoded time had an hour of 24+ or a minute of 60+.
    #[error("HHMM time out of range: {0:04}")]
    InvalidTime(u16),
}

impl DayTime {
    /// Validate and construct a `DayTime`.
    ///
    /// # Errors
    /// Returns [`DayTimeError`] when `day` exceeds 6 or `time` does not
    /// encode a valid 24-hour clock reading.
    pub fn new(day: u8, time: u16) -> Result<Self, DayTimeError> {
        if day > 6 {
            return Err(DayTimeError::InvalidDay(day));
        }
        if time / 100 > 23 || time % 100 > 59 {
            return Err(DayTimeError::InvalidTime(time));
        }
        Ok(Self { day, time })
    }

    /// Convert a timezone-aware timestamp into the week-local form the
    /// evaluator consumes.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use nearbite_core::DayTime;
    ///
    /// // 2026-08-30 is a Sunday.
    /// let dt = Utc.with_ymd_and_hms(2026, 8, 30, 9, 15, 0).unwrap();
    /// assert_eq!(DayTime::from_datetime(&dt), DayTime { day: 0, time: 915 });
    /// ```
    pub fn from_datetime<Tz: chrono::TimeZone>(dt: &chrono::DateTime<Tz>) -> Self {
        let day = dt.weekday().num_days_from_sunday() as u8;
        let time = (dt.hour() * 100 + dt.minute()) as u16;
        Self { day, time }
    }
}

/// One entry in a weekly schedule.
///
/// The source data encodes a period as an open boundary with an optional
/// close boundary. That conflates two situations, so they are kept as
/// distinct variants here: the always-open sentinel and a period whose close
/// boundary is simply missing. The evaluator treats the former as
/// unconditionally open and skips the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpeningPeriod {
    /// Continuous operation with no closing boundary (raw open day 0 at
    /// 00:00 and no close).
    AlwaysOpen,
    /// A complete open/close window. A close day earlier in the week than
    /// the open day means the window wraps across the week boundary, e.g.
    /// Saturday 22:00 through Sunday 03:00.
    Window {
        /// When the window opens.
        open: DayTime,
        /// When the window closes; exclusive.
        close: DayTime,
    },
    /// An open boundary with no close boundary that is not the sentinel.
    /// Incomplete source data, never an error.
    Incomplete {
        /// The recorded open boundary.
        open: DayTime,
    },
}

/// Decide whether a schedule is open at `now`.
///
/// Policy, in order:
/// 1. An empty schedule is closed; unknown hours are never reported open.
/// 2. [`OpeningPeriod::AlwaysOpen`] short-circuits to open.
/// 3. [`OpeningPeriod::Incomplete`] periods are skipped.
/// 4. A window closing on its opening day is open for
///    `open.time <= now.time < close.time` on that day.
/// 5. A window whose open day is strictly greater than its close day wraps
///    across the week boundary: open from `open.time` on the open day and
///    until `close.time` on the close day.
/// 6. Otherwise closed.
///
/// The close boundary is exclusive throughout.
///
/// # Examples
/// ```
/// use nearbite_core::{DayTime, OpeningPeriod, is_open};
///
/// let lunch = OpeningPeriod::Window {
///     open: DayTime { day: 1, time: 1000 },
///     close: DayTime { day: 1, time: 1400 },
/// };
/// assert!(is_open(&[lunch], DayTime { day: 1, time: 1200 }));
/// assert!(!is_open(&[lunch], DayTime { day: 1, time: 1400 }));
/// ```
pub fn is_open(periods: &[OpeningPeriod], now: DayTime) -> bool {
    periods.iter().any(|period| match *period {
        OpeningPeriod::AlwaysOpen => true,
        OpeningPeriod::Incomplete { .. } => false,
        OpeningPeriod::Window { open, close } => {
            if open.day > close.day {
                // Overnight span wrapping across the week boundary.
                (now.day == open.day && now.time >= open.time)
                    || (now.day == close.day && now.time < close.time)
            } else {
                now.day == open.day && now.time >= open.time && now.time < close.time
            }
        }
    })
}
