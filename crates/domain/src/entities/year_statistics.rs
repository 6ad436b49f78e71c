//! Per-year summary statistics of daily mean temperatures

use serde::{Deserialize, Serialize};

/// Count, minimum, maximum and sum of one year's daily values
///
/// The empty state (`count == 0`) has no bounds and no mean; accessors
/// return `None` for those instead of sentinel numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearStatistics {
    year: i32,
    count: u64,
    min: Option<i32>,
    max: Option<i32>,
    sum: i64,
}

impl YearStatistics {
    /// Statistics for a year with no data rows
    #[must_use]
    pub const fn empty(year: i32) -> Self {
        Self {
            year,
            count: 0,
            min: None,
            max: None,
            sum: 0,
        }
    }

    /// Build statistics from a sequence of daily values
    #[must_use]
    pub fn from_values(year: i32, values: impl IntoIterator<Item = i32>) -> Self {
        let mut stats = Self::empty(year);
        for value in values {
            stats.accept(value);
        }
        stats
    }

    /// Fold one daily value into the statistics
    pub fn accept(&mut self, value: i32) {
        self.count += 1;
        self.sum += i64::from(value);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Combine another partial summary of the same year into this one
    pub fn combine(&mut self, other: &Self) {
        self.count += other.count;
        self.sum += other.sum;
        self.min = match (self.min, other.min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Year these statistics describe
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Number of days with a value
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Lowest daily value, `None` when empty
    #[must_use]
    pub const fn min(&self) -> Option<i32> {
        self.min
    }

    /// Highest daily value, `None` when empty
    #[must_use]
    pub const fn max(&self) -> Option<i32> {
        self.max
    }

    /// Sum of all daily values
    #[must_use]
    pub const fn sum(&self) -> i64 {
        self.sum
    }

    /// Arithmetic mean of the daily values, `None` when empty
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / self.count as f64)
    }

    /// Whether no value has been accepted
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}
