//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod weather_history_adapter;

pub use weather_history_adapter::WeatherHistoryAdapter;
