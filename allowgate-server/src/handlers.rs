//! HTTP request handlers

use crate::api::{
    CheckAuthorizationRequest, CheckAuthorizationResponse, HealthResponse, HealthStatus,
};
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, Uri},
    BoxError, Json,
};
use std::time::Instant;
use tracing::debug;

/// `CheckAuthorization` RPC method
pub async fn check_authorization(
    State(state): State<AppState>,
    payload: Result<Json<CheckAuthorizationRequest>, JsonRejection>,
) -> ApiResult<Json<CheckAuthorizationResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        debug!("Rejected CheckAuthorization message: {}", rejection.body_text());
        metrics::record_rejected_message("invalid_message");
        ApiError::from(rejection)
    })?;

    let start = Instant::now();
    let response = state.authorizer.check(&req.into());
    metrics::record_check(response.authorized, start.elapsed().as_secs_f64());

    Ok(Json(response.into()))
}

/// Fallback for paths that name no RPC method
pub async fn unknown_method(uri: Uri) -> ApiError {
    metrics::record_rejected_message("unknown_method");
    ApiError::UnknownMethod(uri.path().to_string())
}

/// Method fallback for routes that exist under another HTTP method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    metrics::record_rejected_message("method_not_allowed");
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Maps errors raised by transport middleware
pub async fn transport_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        metrics::record_rejected_message("timeout");
        ApiError::Timeout
    } else {
        ApiError::Internal(err.to_string())
    }
}

fn health(state: &AppState) -> HealthResponse {
    HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        allow_list_entries: state.authorizer.allow_list().len(),
        membership_mode: state.authorizer.mode(),
    }
}

/// Health check - liveness
pub async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health(&state))
}

/// Health check - readiness
///
/// The allow-list is loaded before the listener is bound, so a server that
/// answers at all is ready.
pub async fn health_ready(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health(&state))
}

/// Prometheus metrics endpoint
pub async fn metrics() -> String {
    metrics::get_prometheus_metrics()
}
