//! Year range value object
//!
//! An inclusive, non-decreasing range of years to fetch history for.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::YearRange;
//!
//! // Missing bounds fall back to the defaults
//! let range = YearRange::normalize(None, None);
//! assert_eq!((range.start(), range.end()), (1950, 2014));
//!
//! // Inverted bounds are swapped
//! let range = YearRange::normalize(Some(2010), Some(2001));
//! assert_eq!((range.start(), range.end()), (2001, 2010));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::errors::DomainError;

/// Start year used when the caller supplies none (or a non-positive one)
pub const DEFAULT_START_YEAR: i32 = 1950;

/// End year used when the caller supplies none (or a non-positive one)
pub const DEFAULT_END_YEAR: i32 = 2014;

/// Inclusive range of years with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Create a range from already ordered bounds
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidYearRange` if `start > end`.
    pub const fn new(start: i32, end: i32) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::invalid_year_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// Normalize raw query bounds using the built-in defaults
    ///
    /// See [`YearRange::normalize_with_defaults`].
    #[must_use]
    pub fn normalize(start: Option<i32>, end: Option<i32>) -> Self {
        Self::normalize_with_defaults(start, end, DEFAULT_START_YEAR, DEFAULT_END_YEAR)
    }

    /// Normalize raw query bounds
    ///
    /// A bound that is absent or `<= 0` is replaced by its default. If the
    /// resulting end precedes the start the two are swapped, so the range is
    /// always non-decreasing.
    #[must_use]
    pub fn normalize_with_defaults(
        start: Option<i32>,
        end: Option<i32>,
        default_start: i32,
        default_end: i32,
    ) -> Self {
        let start = start.filter(|y| *y > 0).unwrap_or(default_start);
        let end = end.filter(|y| *y > 0).unwrap_or(default_end);

        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// First year of the range
    #[must_use]
    pub const fn start(&self) -> i32 {
        self.start
    }

    /// Last year of the range (inclusive)
    #[must_use]
    pub const fn end(&self) -> i32 {
        self.end
    }

    /// Iterate over every year in the range, ascending
    #[must_use]
    pub const fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Number of years in the range (never zero)
    #[must_use]
    pub fn len(&self) -> usize {
        let span = i64::from(self.end) - i64::from(self.start) + 1;
        usize::try_from(span).unwrap_or(usize::MAX)
    }

    /// A normalized range always contains at least one year
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Check whether a year lies within the range
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_YEAR,
            end: DEFAULT_END_YEAR,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
