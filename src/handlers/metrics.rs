use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;

use crate::{AppError, AppResult, AppState};

pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Builds the Prometheus recorder and installs it as the global one.
///
/// Only the first recorder in a process becomes global; later calls (router
/// rebuilds in tests) still get a working, if empty, handle.
pub fn setup_metrics_recorder() -> AppResult<MetricsState> {
    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )
        .map_err(|e| AppError::Internal(format!("Invalid histogram buckets: {}", e)))?;

    let recorder = builder.build_recorder();
    let handle = recorder.handle();

    if metrics::set_global_recorder(recorder).is_err() {
        tracing::debug!("Metrics recorder already installed");
    }

    Ok(MetricsState { handle })
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.handle.render())
}
