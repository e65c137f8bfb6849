use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::{
    models::{ActiveNap, EndedNap, MutationResponse, SavedResponse},
    AppResult, AppState,
};

/// GET /api/active-nap - The running nap, or `null`
#[utoipa::path(
    get,
    path = "/api/active-nap",
    responses(
        (status = 200, description = "Running nap, or null when none", body = ActiveNap)
    ),
    tag = "nap"
)]
pub async fn get_active_nap(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Option<ActiveNap>>> {
    let nap = state.store.active_nap().await?;
    Ok(Json(nap))
}

/// POST /api/active-nap/start - Start a nap, replacing any running one
#[utoipa::path(
    post,
    path = "/api/active-nap/start",
    responses(
        (status = 200, description = "Nap started", body = SavedResponse<ActiveNap>)
    ),
    tag = "nap"
)]
pub async fn start_nap(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<SavedResponse<ActiveNap>>> {
    let nap = ActiveNap::start_now();
    state.store.start_nap(&nap).await?;

    tracing::info!(nap_id = %nap.id, "Nap started");
    Ok(Json(SavedResponse::new(nap)))
}

/// POST /api/active-nap/stop - End the running nap and report how long it lasted
#[utoipa::path(
    post,
    path = "/api/active-nap/stop",
    responses(
        (status = 200, description = "Nap stopped; data is null when none was running", body = SavedResponse<EndedNap>)
    ),
    tag = "nap"
)]
pub async fn stop_nap(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<SavedResponse<Option<EndedNap>>>> {
    let ended = state
        .store
        .clear_nap()
        .await?
        .map(|nap| nap.end_at(Utc::now()));

    match &ended {
        Some(nap) => tracing::info!(nap_id = %nap.id, minutes = nap.duration_minutes, "Nap stopped"),
        None => tracing::debug!("Stop requested with no running nap"),
    }

    Ok(Json(SavedResponse::new(ended)))
}

/// POST /api/active-nap/cancel - Discard the running nap
#[utoipa::path(
    post,
    path = "/api/active-nap/cancel",
    responses(
        (status = 200, description = "Nap discarded", body = MutationResponse)
    ),
    tag = "nap"
)]
pub async fn cancel_nap(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<MutationResponse>> {
    let cancelled = state.store.clear_nap().await?;
    if let Some(nap) = cancelled {
        tracing::info!(nap_id = %nap.id, "Nap cancelled");
    }

    Ok(Json(MutationResponse::ok("Nap cancelled")))
}
