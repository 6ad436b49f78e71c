//! Monthly history CSV parsing
//!
//! Turns one year's raw CSV document into temperature statistics.
//! The first row is a header; each following row is one day with
//! `date, maxTemp, meanTemp, ...` columns. Rows are split on every comma:
//! double quotes carry no meaning.

use csv::{ReaderBuilder, Trim};
use domain::{RawYearDocument, YearStatistics};
use tracing::debug;

use crate::error::ApplicationError;

/// Zero-based index of the mean daily temperature column
pub const MEAN_TEMP_COLUMN: usize = 2;

/// Parse one year's document into statistics of the mean temperature column
///
/// Rows whose mean temperature field is missing or empty are skipped and do
/// not count. Any other value must be an integer.
///
/// # Errors
///
/// Returns [`ApplicationError::ParseFailed`] for a non-empty field that is not
/// an integer, or for CSV the reader cannot decode.
pub fn parse_year(document: &RawYearDocument) -> Result<YearStatistics, ApplicationError> {
    let year = document.year;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(document.body.trim().as_bytes());

    let mut stats = YearStatistics::empty(year);
    let mut skipped = 0_usize;

    for record in reader.records() {
        let record = record.map_err(|e| ApplicationError::ParseFailed {
            year,
            line: e.position().map_or(0, csv::Position::line),
            reason: e.to_string(),
        })?;

        let Some(field) = record.get(MEAN_TEMP_COLUMN).filter(|f| !f.is_empty()) else {
            skipped += 1;
            continue;
        };

        let value = field
            .parse::<i32>()
            .map_err(|e| ApplicationError::ParseFailed {
                year,
                line: record.position().map_or(0, csv::Position::line),
                reason: format!("invalid mean temperature {field:?}: {e}"),
            })?;
        stats.accept(value);
    }

    debug!(year, days = stats.count(), skipped, "Parsed history CSV");
    Ok(stats)
}
