//! Weather History HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use application::WeatherHistoryService;
use infrastructure::{AppConfig, WeatherHistoryAdapter};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal, sync::Notify};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before tracing so the log format can be honoured
    let config_result = AppConfig::load();
    let json_logs = config_result
        .as_ref()
        .is_ok_and(|config| config.server.json_logs());

    init_tracing(json_logs);

    info!(
        "🌡️ Weather history server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = config_result.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        history_base_url = %config.history.base_url,
        default_start_year = config.query.default_start_year,
        default_end_year = config.query.default_end_year,
        "Configuration loaded"
    );

    // Initialize services
    let adapter = WeatherHistoryAdapter::with_config(config.history.clone());
    let weather_service = WeatherHistoryService::new(Arc::new(adapter));

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));
    let addr = config.server.bind_address();

    let state = AppState::new(weather_service, config);
    let app = routes::create_router(state);

    // Start server
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("🔎 Try: http://{}/weather/KJFK/1?startYear=2010&endYear=2014", addr);

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Arc::clone(&shutdown), shutdown_timeout))
        .into_future();

    tokio::select! {
        result = server => result?,
        () = async {
            shutdown.notified().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            tracing::warn!("Shutdown timeout elapsed, dropping open connections");
        }
    }

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Install the global tracing subscriber
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,weather_history_server=debug,tower_http=debug".into());

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
///
/// Notifies `started` once a signal arrives so the caller can bound the drain.
async fn shutdown_signal(started: Arc<Notify>, timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    started.notify_one();
    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
