//! Weather history handlers
//!
//! `GET /weather/{airport_code}/{month}?startYear=..&endYear=..` returns one
//! temperature summary per year, keyed by year in ascending order.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use domain::{AirportCode, Month, WeatherReport, YearStatistics};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Optional year bounds from the query string
///
/// An empty value (`?startYear=`) counts as missing.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherQuery {
    /// First year, substituted by the configured default when missing or not positive
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start_year: Option<i32>,
    /// Last year, substituted by the configured default when missing or not positive
    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_year: Option<i32>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Summary of one year's mean daily temperatures
///
/// The temperature fields are `null` for a year without any data rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub days: u64,
    pub min_daily_mean_temp: Option<i32>,
    pub mean_daily_mean_temp: Option<f64>,
    pub max_daily_mean_temp: Option<i32>,
}

impl From<&YearStatistics> for YearSummary {
    fn from(stats: &YearStatistics) -> Self {
        Self {
            days: stats.count(),
            min_daily_mean_temp: stats.min(),
            mean_daily_mean_temp: stats.mean(),
            max_daily_mean_temp: stats.max(),
        }
    }
}

/// Response body: year to summary, serialized with string keys in year order
pub type WeatherResponse = BTreeMap<i32, YearSummary>;

/// Convert a report into the response body
#[must_use]
pub fn to_response(report: &WeatherReport) -> WeatherResponse {
    report
        .iter()
        .map(|stats| (stats.year(), YearSummary::from(stats)))
        .collect()
}

/// Fetch per-year temperature statistics for an airport and month
#[instrument(skip_all)]
pub async fn get_weather(
    State(state): State<AppState>,
    path: Result<Path<(String, i32)>, PathRejection>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let Path((airport_code, month)) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let airport_code =
        AirportCode::new(airport_code).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let month = Month::new(month);
    let range = state.config.query.year_range(query.start_year, query.end_year);
    if state.config.query.exceeds_max_span(&range) {
        return Err(ApiError::BadRequest(format!(
            "Year range {range} spans {} years, more than the allowed {}",
            range.len(),
            state.config.query.max_span.unwrap_or_default()
        )));
    }

    if !month.is_calendar_month() {
        warn!(month = %month, "Month outside 1-12, passing through");
    }

    let started = Instant::now();
    let report = state
        .weather_service
        .get_weather(&airport_code, month, range)
        .await
        .map_err(|e| {
            warn!(
                airport = %airport_code,
                month = %month,
                range = %range,
                error = %e,
                "Weather query failed"
            );
            ApiError::from(e)
        })?;

    #[allow(clippy::cast_possible_truncation)]
    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        airport = %airport_code,
        month = %month,
        range = %range,
        years = report.len(),
        elapsed_ms,
        "Weather query served"
    );

    Ok(Json(to_response(&report)))
}
