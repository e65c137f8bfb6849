use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Instant;

use crate::{models::HealthStatus, AppState};

static STARTED_AT: Lazy<Instant> = Lazy::new(Instant::now);

/// Pins the uptime origin to process start instead of the first probe.
pub fn mark_started() {
    Lazy::force(&STARTED_AT);
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service and storage are up", body = HealthStatus),
        (status = 503, description = "Storage does not answer", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthStatus>) {
    let storage = state.store.backend();
    let reachable = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(storage, error = %e, "Health probe failed");
            false
        }
    };

    let database = match (storage, reachable) {
        ("postgres", true) => "connected",
        ("postgres", false) => "unreachable",
        _ => "not configured",
    };

    let (code, status) = if reachable {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthStatus {
            status: status.to_string(),
            timestamp: Utc::now(),
            storage: storage.to_string(),
            database: database.to_string(),
            uptime_seconds: STARTED_AT.elapsed().as_secs(),
        }),
    )
}
