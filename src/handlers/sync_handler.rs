use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{db::repo, models::SyncSnapshot, AppResult, AppState};

/// GET /api/sync - Every resource in one round trip
#[utoipa::path(
    get,
    path = "/api/sync",
    responses(
        (status = 200, description = "All stored data", body = SyncSnapshot)
    ),
    tag = "sync"
)]
pub async fn get_sync(State(state): State<Arc<AppState>>) -> AppResult<Json<SyncSnapshot>> {
    let snapshot = repo::snapshot(state.store.as_ref()).await?;
    Ok(Json(snapshot))
}
