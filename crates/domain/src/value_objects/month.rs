//! Month value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Month number of a history query
///
/// Expected to be 1-12 but carried through unvalidated: the upstream
/// history source decides what an out-of-range month means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Month(i32);

impl Month {
    /// Wrap a raw month number
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw month number
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether the month lies in the calendar range 1-12
    #[must_use]
    pub const fn is_calendar_month(self) -> bool {
        self.0 >= 1 && self.0 <= 12
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Month {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
