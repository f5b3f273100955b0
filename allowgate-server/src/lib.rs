//! allowgate RPC server - remote allow-list checks
//!
//! Exposes a single `CheckAuthorization` method over HTTP/JSON, plus health
//! and Prometheus endpoints, on top of `allowgate-core`.

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod state;
pub mod tracing;

pub use api::{CheckAuthorizationRequest, CheckAuthorizationResponse, HealthResponse};
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::trace::TraceLayer;

/// Path of the `CheckAuthorization` RPC method
pub const CHECK_AUTHORIZATION_PATH: &str = "/auth.AuthService/CheckAuthorization";

/// Build the application router
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let app = Router::new()
        // RPC methods
        .route(
            CHECK_AUTHORIZATION_PATH,
            post(handlers::check_authorization).fallback(handlers::method_not_allowed),
        )
        // Health checks
        .route(
            "/health/live",
            get(handlers::health_live).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health/ready",
            get(handlers::health_ready).fallback(handlers::method_not_allowed),
        )
        // Metrics
        .route(
            "/metrics",
            get(handlers::metrics).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::unknown_method)
        .with_state(state);

    with_transport_layers(app, request_timeout)
}

/// Tracing and per-request timeout; middleware errors become JSON error bodies
fn with_transport_layers(app: Router, request_timeout: Duration) -> Router {
    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(handlers::transport_error))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}
