//! Application services - Use case implementations

mod weather_history_service;

pub use weather_history_service::WeatherHistoryService;
