use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    db::repo,
    extractors::ApiJson,
    models::{MutationResponse, PottyEntry, SavedResponse},
    AppResult, AppState,
};

/// GET /api/potty-entries
#[utoipa::path(
    get,
    path = "/api/potty-entries",
    responses(
        (status = 200, description = "All potty entries", body = Vec<PottyEntry>)
    ),
    tag = "potty"
)]
pub async fn get_potty_entries(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<PottyEntry>>> {
    let entries = repo::list::<PottyEntry>(state.store.as_ref()).await?;
    Ok(Json(entries))
}

/// POST /api/potty-entries
#[utoipa::path(
    post,
    path = "/api/potty-entries",
    request_body = PottyEntry,
    responses(
        (status = 200, description = "Potty entry saved", body = SavedResponse<PottyEntry>),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Time is not HH:MM AM/PM")
    ),
    tag = "potty"
)]
pub async fn create_potty_entry(
    State(state): State<Arc<AppState>>,
    ApiJson(entry): ApiJson<PottyEntry>,
) -> AppResult<Json<SavedResponse<PottyEntry>>> {
    super::save_record(&state, entry).await
}

/// PUT /api/potty-entries/{id}
#[utoipa::path(
    put,
    path = "/api/potty-entries/{id}",
    params(("id" = String, Path, description = "Potty entry id")),
    request_body = PottyEntry,
    responses(
        (status = 200, description = "Potty entry replaced", body = SavedResponse<PottyEntry>),
        (status = 400, description = "Body id does not match path"),
        (status = 404, description = "Potty entry not found")
    ),
    tag = "potty"
)]
pub async fn update_potty_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(entry): ApiJson<PottyEntry>,
) -> AppResult<Json<SavedResponse<PottyEntry>>> {
    super::replace_record(&state, id, entry).await
}

/// DELETE /api/potty-entries/{id}
#[utoipa::path(
    delete,
    path = "/api/potty-entries/{id}",
    params(("id" = String, Path, description = "Potty entry id")),
    responses(
        (status = 200, description = "Potty entry deleted", body = MutationResponse),
        (status = 404, description = "Potty entry not found")
    ),
    tag = "potty"
)]
pub async fn delete_potty_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MutationResponse>> {
    super::delete_record::<PottyEntry>(&state, &id).await
}

/// DELETE /api/potty-entries
#[utoipa::path(
    delete,
    path = "/api/potty-entries",
    responses(
        (status = 200, description = "All potty entries deleted", body = MutationResponse)
    ),
    tag = "potty"
)]
pub async fn delete_all_potty_entries(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<MutationResponse>> {
    super::clear_records::<PottyEntry>(&state).await
}
