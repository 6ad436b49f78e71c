//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method, Uri},
    middleware::map_response_with_state,
    routing::get,
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{ApiError, expose_error_details},
    handlers,
    middleware::RequestIdLayer,
    state::AppState,
};

/// Create the main router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let cors = state
        .config
        .server
        .cors_enabled
        .then(|| cors_layer(&state.config.server));

    let router = Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Weather history
        .route(
            "/weather/{airport_code}/{month}",
            get(handlers::weather::get_weather),
        )
        .fallback(not_found)
        // Middleware (last added = outermost)
        .layer(map_response_with_state(state.clone(), expose_error_details))
        // Attach state
        .with_state(state)
        .layer(RequestIdLayer::new())
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// Build the CORS layer from server configuration
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
