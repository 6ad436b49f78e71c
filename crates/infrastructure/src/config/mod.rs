//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `query`: Default year bounds for weather queries
//!
//! The history client settings reuse [`HistoryConfig`] from the integration crate.

mod query;
mod server;

use std::path::Path;

use integration_weather::HistoryConfig;
use serde::{Deserialize, Serialize};

pub use query::QueryConfig;
pub use server::ServerConfig;

/// Environment variable prefix, e.g. `WXHISTORY_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "WXHISTORY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream history service configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Query defaults
    #[serde(default)]
    pub query: QueryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.*` file
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the named file (extension optional) and environment
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load_from(file: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 9998)?
            .set_default("history.base_url", "http://www.wunderground.com")?
            .set_default("query.default_start_year", domain::DEFAULT_START_YEAR)?
            .set_default("query.default_end_year", domain::DEFAULT_END_YEAR)?
            // Load from file if exists
            .add_source(config::File::from(file.as_ref()).required(false))
            // Override with environment variables (e.g., WXHISTORY_HISTORY__TIMEOUT_SECS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 9998);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.history.base_url, "http://www.wunderground.com");
        assert_eq!(config.query, QueryConfig::default());
    }

    #[test]
    fn app_config_deserialization_fills_sections() {
        let json = r#"{"server":{"port":8080},"history":{"timeout_secs":5}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.history.timeout_secs, 5);
        assert_eq!(config.query.default_start_year, 1950);
    }

    #[test]
    fn app_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"port\":9998"));
        assert!(json.contains("default_end_year"));
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 9998);
        assert_eq!(config.query.default_end_year, 2014);
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 7000\nlog_format = \"json\"\n\n\
             [history]\nbase_url = \"http://localhost:9000\"\n\n\
             [query]\ndefault_start_year = 1990\nmax_span = 40"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.port, 7000);
        assert!(config.server.json_logs());
        assert_eq!(config.history.base_url, "http://localhost:9000");
        assert_eq!(config.history.timeout_secs, 30);
        assert_eq!(config.query.max_span, Some(40));
        assert_eq!(config.query.default_start_year, 1990);
        assert_eq!(config.query.default_end_year, 2014);
    }

    #[test]
    fn config_has_debug_impl() {
        let debug = format!("{:?}", AppConfig::default());
        assert!(debug.contains("AppConfig"));
        assert!(debug.contains("history"));
    }
}
