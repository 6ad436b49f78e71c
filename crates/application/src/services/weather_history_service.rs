//! Weather history aggregation service
//!
//! Fans out one fetch-and-parse task per year of a query, then folds the
//! per-year results into a single [`WeatherReport`]. The query succeeds only
//! if every year succeeds; the first failing year fails the whole query.
//!
//! All tasks of a query share one [`HistorySession`]. The session is closed
//! once, when the last task releases it, whether the query succeeded or not.
//! Tasks still in flight when the query fails are detached, not cancelled.

use std::sync::Arc;
use std::time::Instant;

use domain::{AirportCode, Month, WeatherReport, YearRange, YearStatistics};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, instrument, warn};

use crate::csv_parser::parse_year;
use crate::error::ApplicationError;
use crate::ports::{HistorySession, HistorySourcePort};

/// Closes the wrapped session when dropped
///
/// Shared through an `Arc` by every year task of one query, so the close
/// runs exactly once, after the last task has finished with the session.
struct SessionGuard {
    session: Box<dyn HistorySession>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.session.close();
    }
}

/// Service assembling per-year temperature statistics for an airport and month
pub struct WeatherHistoryService {
    source: Arc<dyn HistorySourcePort>,
}

impl std::fmt::Debug for WeatherHistoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherHistoryService")
            .field("source", &"<HistorySourcePort>")
            .finish()
    }
}

impl WeatherHistoryService {
    /// Create a new service on top of a history source
    #[must_use]
    pub fn new(source: Arc<dyn HistorySourcePort>) -> Self {
        Self { source }
    }

    /// Build the weather report for every year in `range`
    ///
    /// One task is spawned per year with no upper bound, so callers that take
    /// ranges from untrusted input should cap `range.len()` first.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::AggregateFailed`] wrapping the first year
    /// that failed to fetch or parse, or the session error if no session
    /// could be opened.
    #[instrument(skip_all, fields(airport = %airport_code, month = %month, range = %range))]
    pub async fn get_weather(
        &self,
        airport_code: &AirportCode,
        month: Month,
        range: YearRange,
    ) -> Result<WeatherReport, ApplicationError> {
        let started = Instant::now();
        let guard = Arc::new(SessionGuard {
            session: self.source.open_session()?,
        });

        let mut branches: FuturesUnordered<JoinHandle<Result<YearStatistics, ApplicationError>>> =
            range
                .years()
                .map(|year| spawn_year(Arc::clone(&guard), airport_code.clone(), month, year))
                .collect();
        drop(guard);

        debug!(branches = branches.len(), "Fanned out year requests");

        let mut report = WeatherReport::new();
        while let Some(joined) = branches.next().await {
            let outcome = joined
                .map_err(|e| ApplicationError::Internal(format!("year task failed: {e}")))
                .and_then(|result| result);

            match outcome {
                Ok(stats) => {
                    debug!(year = stats.year(), days = stats.count(), "Year completed");
                    report = report.merge(WeatherReport::singleton(stats));
                },
                Err(err) => {
                    warn!(
                        error = %err,
                        pending = branches.len(),
                        "Year failed, abandoning weather report"
                    );
                    return Err(ApplicationError::aggregate(airport_code, month, err));
                },
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(years = report.len(), elapsed_ms, "Weather report assembled");

        Ok(report)
    }
}

/// Spawn the fetch-and-parse task for one year
fn spawn_year(
    guard: Arc<SessionGuard>,
    airport_code: AirportCode,
    month: Month,
    year: i32,
) -> JoinHandle<Result<YearStatistics, ApplicationError>> {
    tokio::spawn(
        async move {
            let result = fetch_year_statistics(&guard, &airport_code, month, year).await;
            // Release the session before the result becomes visible
            drop(guard);
            result
        }
        .in_current_span(),
    )
}

async fn fetch_year_statistics(
    guard: &SessionGuard,
    airport_code: &AirportCode,
    month: Month,
    year: i32,
) -> Result<YearStatistics, ApplicationError> {
    let document = guard.session.fetch_year(airport_code, month, year).await?;
    parse_year(&document)
}
