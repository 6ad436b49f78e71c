//! Year-ordered collection of per-year statistics
//!
//! A `WeatherReport` is assembled by merging single-year partial reports.
//! `merge` is associative and commutative, so partial reports can be
//! combined in whatever order their years complete.
//!
//! # Examples
//!
//! ```
//! use domain::{WeatherReport, YearStatistics};
//!
//! let a = WeatherReport::singleton(YearStatistics::from_values(2002, [40]));
//! let b = WeatherReport::singleton(YearStatistics::from_values(2001, [35]));
//!
//! let report = a.merge(b);
//! assert_eq!(report.years().collect::<Vec<_>>(), vec![2001, 2002]);
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::entities::YearStatistics;
use crate::value_objects::YearRange;

/// Statistics keyed by year, iterated in ascending year order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherReport {
    by_year: BTreeMap<i32, YearStatistics>,
}

impl WeatherReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a report holding a single year
    #[must_use]
    pub fn singleton(stats: YearStatistics) -> Self {
        let mut report = Self::new();
        report.insert(stats);
        report
    }

    /// Add one year's statistics
    ///
    /// If the year is already present the two summaries are combined.
    pub fn insert(&mut self, stats: YearStatistics) {
        match self.by_year.entry(stats.year()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(stats);
            },
            btree_map::Entry::Occupied(mut slot) => slot.get_mut().combine(&stats),
        }
    }

    /// Merge two partial reports into one
    ///
    /// Keys are unioned; a year present in both is combined with
    /// [`YearStatistics::combine`]. The smaller map is folded into the larger.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let (mut larger, smaller) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        for stats in smaller.by_year.into_values() {
            larger.insert(stats);
        }
        larger
    }

    /// Statistics for a given year
    #[must_use]
    pub fn get(&self, year: i32) -> Option<&YearStatistics> {
        self.by_year.get(&year)
    }

    /// Years present, ascending
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.by_year.keys().copied()
    }

    /// Statistics in ascending year order
    pub fn iter(&self) -> impl Iterator<Item = &YearStatistics> {
        self.by_year.values()
    }

    /// Number of years in the report
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    /// Whether the report holds no years
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }

    /// Whether the report's years are exactly the years of `range`
    #[must_use]
    pub fn covers_exactly(&self, range: &YearRange) -> bool {
        self.len() == range.len() && self.years().eq(range.years())
    }
}

impl FromIterator<YearStatistics> for WeatherReport {
    fn from_iter<I: IntoIterator<Item = YearStatistics>>(iter: I) -> Self {
        let mut report = Self::new();
        for stats in iter {
            report.insert(stats);
        }
        report
    }
}

impl IntoIterator for WeatherReport {
    type Item = YearStatistics;
    type IntoIter = btree_map::IntoValues<i32, YearStatistics>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_year.into_values()
    }
}

impl<'a> IntoIterator for &'a WeatherReport {
    type Item = &'a YearStatistics;
    type IntoIter = btree_map::Values<'a, i32, YearStatistics>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_year.values()
    }
}
