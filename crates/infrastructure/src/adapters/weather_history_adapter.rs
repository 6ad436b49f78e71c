//! Weather history adapter - Implements the history ports using integration_weather

use application::error::ApplicationError;
use application::ports::{HistorySession, HistorySourcePort};
use async_trait::async_trait;
use domain::{AirportCode, Month, RawYearDocument};
use integration_weather::{
    HistoryClient, HistoryConfig, HistoryError, HistoryQuery, HistorySession as HttpSession,
};
use tracing::{debug, instrument};

/// Adapter for the airport history CSV service
#[derive(Debug, Clone)]
pub struct WeatherHistoryAdapter {
    client: HistoryClient,
}

impl WeatherHistoryAdapter {
    /// Create a new adapter with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    /// Create with custom configuration
    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            client: HistoryClient::new(config),
        }
    }

    /// Map integration history error to application error for one year
    fn map_error(year: i32, err: HistoryError) -> ApplicationError {
        match err {
            HistoryError::ConnectionFailed(e) => ApplicationError::Internal(e),
            other => ApplicationError::FetchFailed {
                year,
                reason: other.to_string(),
            },
        }
    }
}

impl Default for WeatherHistoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HistorySourcePort for WeatherHistoryAdapter {
    fn open_session(&self) -> Result<Box<dyn HistorySession>, ApplicationError> {
        let session = self
            .client
            .open_session()
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Box::new(HttpHistorySession { inner: session }))
    }
}

/// Session bridging the application port to one HTTP history session
#[derive(Debug)]
struct HttpHistorySession {
    inner: HttpSession,
}

#[async_trait]
impl HistorySession for HttpHistorySession {
    #[instrument(skip(self, airport_code), fields(airport = %airport_code))]
    async fn fetch_year(
        &self,
        airport_code: &AirportCode,
        month: Month,
        year: i32,
    ) -> Result<RawYearDocument, ApplicationError> {
        let query = HistoryQuery::new(airport_code.as_str(), year, month.value());
        let body = self
            .inner
            .fetch_csv(&query)
            .await
            .map_err(|e| WeatherHistoryAdapter::map_error(year, e))?;

        debug!(bytes = body.len(), "Fetched year document");
        Ok(RawYearDocument::new(year, body))
    }

    fn close(&self) {
        self.inner.close();
    }
}
