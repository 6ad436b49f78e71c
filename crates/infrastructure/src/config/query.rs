//! Weather query defaults.

use domain::{DEFAULT_END_YEAR, DEFAULT_START_YEAR, YearRange};
use serde::{Deserialize, Serialize};

/// Year bounds used when a request omits `startYear` or `endYear`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Start year substituted for a missing or non-positive `startYear`
    #[serde(default = "default_start_year")]
    pub default_start_year: i32,

    /// End year substituted for a missing or non-positive `endYear`
    #[serde(default = "default_end_year")]
    pub default_end_year: i32,

    /// Largest number of years one request may fan out to (unbounded when unset)
    #[serde(default)]
    pub max_span: Option<usize>,
}

const fn default_start_year() -> i32 {
    DEFAULT_START_YEAR
}

const fn default_end_year() -> i32 {
    DEFAULT_END_YEAR
}

impl QueryConfig {
    /// Normalize request bounds against the configured defaults
    #[must_use]
    pub fn year_range(&self, start: Option<i32>, end: Option<i32>) -> YearRange {
        YearRange::normalize_with_defaults(
            start,
            end,
            self.default_start_year,
            self.default_end_year,
        )
    }

    /// Whether `range` covers more years than `max_span` allows
    #[must_use]
    pub fn exceeds_max_span(&self, range: &YearRange) -> bool {
        self.max_span.is_some_and(|max| range.len() > max)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_start_year: default_start_year(),
            default_end_year: default_end_year(),
            max_span: None,
        }
    }
}
