//! Application state shared across handlers

use std::sync::Arc;

use application::WeatherHistoryService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Weather history service for report assembly
    pub weather_service: Arc<WeatherHistoryService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state from a service and configuration
    #[must_use]
    pub fn new(weather_service: WeatherHistoryService, config: AppConfig) -> Self {
        Self {
            weather_service: Arc::new(weather_service),
            config: Arc::new(config),
        }
    }
}
