use super::ApiState;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::{Json, response::IntoResponse};
use cdesk_derive::{api_handler, api_model};
use cdesk_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;

/// Liveness report.
#[api_model]
pub struct HealthResponse {
    /// `up`, or `degraded` when the store does not answer
    pub status: String,
    /// Server version
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Service and store are up", body = HealthResponse),
        (status = SERVICE_UNAVAILABLE, description = "Store unreachable", body = HealthResponse),
    ),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let (code, status) = match state.database.session().health().await {
        Ok(()) => (StatusCode::OK, "up"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: store unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        }
    };

    let body = HealthResponse {
        status: status.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: START_TIME.elapsed().as_secs(),
    };

    (
        code,
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
