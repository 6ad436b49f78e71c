//! Weather history source port
//!
//! Defines the interface for fetching raw monthly history documents.

use async_trait::async_trait;
use domain::{AirportCode, Month, RawYearDocument};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A connection-reusing handle for the fetches of one history query
///
/// Fetches may run concurrently through `&self`. The owner calls
/// [`HistorySession::close`] exactly once, after every fetch has settled.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistorySession: Send + Sync {
    /// Fetch the raw CSV document for one airport, month and year
    ///
    /// Transport errors, timeouts and non-success responses all surface as
    /// [`ApplicationError::FetchFailed`].
    async fn fetch_year(
        &self,
        airport_code: &AirportCode,
        month: Month,
        year: i32,
    ) -> Result<RawYearDocument, ApplicationError>;

    /// Release the underlying connections
    fn close(&self);
}

/// Port for opening history sessions
#[cfg_attr(test, automock)]
pub trait HistorySourcePort: Send + Sync {
    /// Open a new session for one history query
    fn open_session(&self) -> Result<Box<dyn HistorySession>, ApplicationError>;
}
