//! Historical airport weather integration
//!
//! Client for the Weather Underground airport history endpoint, which serves
//! one month of daily observations per request as CSV.
//! A [`HistoryClient`] opens one [`HistorySession`] per aggregate query; the
//! session owns a connection-reusing HTTP client until it is closed.

pub mod client;
mod models;

pub use client::{HistoryClient, HistoryConfig, HistoryError, HistorySession};
pub use models::HistoryQuery;
