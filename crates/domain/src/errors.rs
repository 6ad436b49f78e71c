//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Airport code is empty or cannot be embedded in a request path
    #[error("Invalid airport code: {0:?}")]
    InvalidAirportCode(String),

    /// Year range bounds are out of order
    #[error("Invalid year range: {start} > {end}")]
    InvalidYearRange { start: i32, end: i32 },
}

impl DomainError {
    /// Create an invalid year range error
    pub const fn invalid_year_range(start: i32, end: i32) -> Self {
        Self::InvalidYearRange { start, end }
    }
}
