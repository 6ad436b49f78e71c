//! Domain entities - Objects produced and combined by a history query

mod raw_year_document;
mod weather_report;
mod year_statistics;

pub use raw_year_document::RawYearDocument;
pub use weather_report::WeatherReport;
pub use year_statistics::YearStatistics;
