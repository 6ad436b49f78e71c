//! Request model for the history endpoint

use std::fmt;

/// One monthly history request: an airport, a year and a month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Airport code, embedded verbatim in the request path
    pub airport_code: String,
    /// Year of the requested month
    pub year: i32,
    /// Month number, passed through unvalidated
    pub month: i32,
}

impl HistoryQuery {
    /// Create a new query
    #[must_use]
    pub fn new(airport_code: impl Into<String>, year: i32, month: i32) -> Self {
        Self {
            airport_code: airport_code.into(),
            year,
            month,
        }
    }

    /// Path of the monthly history page, relative to the service base URL
    ///
    /// The page starts on day 1 of the month; the `format=1` query switches
    /// the response to CSV.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "/history/airport/{}/{}/{}/1/MonthlyHistory.html",
            self.airport_code, self.year, self.month
        )
    }
}

impl fmt::Display for HistoryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{:02}", self.airport_code, self.year, self.month)
    }
}
