//! History CSV client
//!
//! HTTP client for the airport history endpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::HistoryQuery;

/// History client errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The HTTP client could not be created
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the history service failed (transport error or timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The history service answered with a server error
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The session was closed before the request was issued
    #[error("History session is closed")]
    SessionClosed,
}

/// History service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Service base URL (default: <http://www.wunderground.com>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://www.wunderground.com".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("weather-history/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Factory for history sessions
///
/// Holds only configuration; every call to [`HistoryClient::open_session`]
/// builds a fresh HTTP client.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    config: HistoryConfig,
}

impl HistoryClient {
    /// Create a new history client with the given configuration
    pub fn new(config: HistoryConfig) -> Self {
        Self { config }
    }

    /// Create a new client with default configuration
    pub fn with_defaults() -> Self {
        Self::new(HistoryConfig::default())
    }

    /// Access the configuration
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Open a session backed by a new connection-reusing HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn open_session(&self) -> Result<HistorySession, HistoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .user_agent(self.config.user_agent.clone())
            .build()
            .map_err(|e| HistoryError::ConnectionFailed(e.to_string()))?;

        debug!(base_url = %self.config.base_url, "Opened history session");

        Ok(HistorySession {
            client,
            base_url: self.config.base_url.trim_end_matches('/').to_string(),
            closed: AtomicBool::new(false),
        })
    }
}

/// One aggregate query's worth of HTTP connections
///
/// Requests may be issued concurrently through a shared reference.
/// Once [`HistorySession::close`] has been called, further requests fail
/// with [`HistoryError::SessionClosed`].
#[derive(Debug)]
pub struct HistorySession {
    client: Client,
    base_url: String,
    closed: AtomicBool,
}

impl HistorySession {
    /// Build the full URL for a query, without the query string
    fn build_url(&self, query: &HistoryQuery) -> String {
        format!("{}{}", self.base_url, query.path())
    }

    /// Fetch the raw CSV body for one airport, year and month
    #[instrument(
        skip_all,
        fields(airport = %query.airport_code, year = query.year, month = query.month)
    )]
    pub async fn fetch_csv(&self, query: &HistoryQuery) -> Result<String, HistoryError> {
        if self.is_closed() {
            return Err(HistoryError::SessionClosed);
        }

        let url = self.build_url(query);
        debug!(url = %url, "Fetching history CSV");

        let response = self
            .client
            .get(&url)
            .query(&[("format", "1")])
            .send()
            .await
            .map_err(|e| HistoryError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(HistoryError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(HistoryError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(HistoryError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| HistoryError::Body(e.to_string()))?;

        debug!(bytes = body.len(), "Received history CSV");
        Ok(body)
    }

    /// Close the session
    ///
    /// Returns `true` if this call closed it, `false` if it was already closed.
    pub fn close(&self) -> bool {
        let first = !self.closed.swap(true, Ordering::AcqRel);
        if first {
            debug!("Closed history session");
        } else {
            warn!("History session closed more than once");
        }
        first
    }

    /// Whether the session has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = HistoryConfig::default();
        assert_eq!(config.base_url, "http://www.wunderground.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("weather-history/"));
    }

    #[test]
    fn test_build_url() {
        let session = HistoryClient::with_defaults()
            .open_session()
            .expect("session creation should succeed");
        let url = session.build_url(&HistoryQuery::new("KJFK", 2020, 1));
        assert_eq!(
            url,
            "http://www.wunderground.com/history/airport/KJFK/2020/1/1/MonthlyHistory.html"
        );
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let client = HistoryClient::new(HistoryConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        });
        let session = client.open_session().expect("session creation should succeed");
        let url = session.build_url(&HistoryQuery::new("EDDB", 1999, 12));
        assert_eq!(
            url,
            "http://localhost:8080/history/airport/EDDB/1999/12/1/MonthlyHistory.html"
        );
    }

    #[test]
    fn test_close_is_reported_once() {
        let session = HistoryClient::with_defaults()
            .open_session()
            .expect("session creation should succeed");
        assert!(!session.is_closed());
        assert!(session.close());
        assert!(session.is_closed());
        assert!(!session.close());
    }

    #[test]
    fn test_history_error_display() {
        assert_eq!(
            HistoryError::SessionClosed.to_string(),
            "History session is closed"
        );
        assert!(
            HistoryError::RateLimitExceeded
                .to_string()
                .contains("Rate limit")
        );
        assert_eq!(
            HistoryError::ServiceUnavailable("HTTP 503".to_string()).to_string(),
            "Service unavailable: HTTP 503"
        );
    }

    #[test]
    fn test_config_deserialization_fills_defaults() {
        let config: HistoryConfig =
            serde_json::from_str(r#"{"base_url":"http://mock"}"#).expect("should deserialize");
        assert_eq!(config.base_url, "http://mock");
        assert_eq!(config.timeout_secs, 30);
    }
}
