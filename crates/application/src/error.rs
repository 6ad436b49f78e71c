//! Application-level errors

use domain::{AirportCode, DomainError, Month};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Fetching one year's history failed (transport, timeout or non-success status)
    #[error("Fetch failed for {year}: {reason}")]
    FetchFailed { year: i32, reason: String },

    /// One year's CSV contained a malformed value
    #[error("Parse failed for {year} at line {line}: {reason}")]
    ParseFailed { year: i32, line: u64, reason: String },

    /// A history query failed; carries the first failing year's error
    #[error("Weather history for {airport_code}, month {month} failed: {source}")]
    AggregateFailed {
        airport_code: String,
        month: i32,
        #[source]
        source: Box<ApplicationError>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Wrap a branch failure as the failure of the whole query
    pub fn aggregate(airport_code: &AirportCode, month: Month, source: Self) -> Self {
        Self::AggregateFailed {
            airport_code: airport_code.to_string(),
            month: month.value(),
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through aggregate wrappers
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::AggregateFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Check if this error (or the error it wraps) came from fetching
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self.root_cause(), Self::FetchFailed { .. })
    }

    /// Check if this error (or the error it wraps) came from parsing
    pub fn is_parse_failure(&self) -> bool {
        matches!(self.root_cause(), Self::ParseFailed { .. })
    }
}
