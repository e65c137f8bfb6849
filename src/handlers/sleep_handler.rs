use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    db::repo,
    extractors::ApiJson,
    models::{MutationResponse, SavedResponse, SleepEntry},
    AppResult, AppState,
};

#[utoipa::path(
    get,
    path = "/api/sleep-entries",
    responses(
        (status = 200, description = "All sleep entries", body = Vec<SleepEntry>)
    ),
    tag = "sleep"
)]
pub async fn get_sleep_entries(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<SleepEntry>>> {
    let entries = repo::list::<SleepEntry>(state.store.as_ref()).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    post,
    path = "/api/sleep-entries",
    request_body = SleepEntry,
    responses(
        (status = 200, description = "Sleep entry saved", body = SavedResponse<SleepEntry>),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Bad clock time or negative duration")
    ),
    tag = "sleep"
)]
pub async fn create_sleep_entry(
    State(state): State<Arc<AppState>>,
    ApiJson(entry): ApiJson<SleepEntry>,
) -> AppResult<Json<SavedResponse<SleepEntry>>> {
    super::save_record(&state, entry).await
}

#[utoipa::path(
    put,
    path = "/api/sleep-entries/{id}",
    params(("id" = String, Path, description = "Sleep entry id")),
    request_body = SleepEntry,
    responses(
        (status = 200, description = "Sleep entry replaced", body = SavedResponse<SleepEntry>),
        (status = 400, description = "Body id does not match path"),
        (status = 404, description = "Sleep entry not found")
    ),
    tag = "sleep"
)]
pub async fn update_sleep_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(entry): ApiJson<SleepEntry>,
) -> AppResult<Json<SavedResponse<SleepEntry>>> {
    super::replace_record(&state, id, entry).await
}

#[utoipa::path(
    delete,
    path = "/api/sleep-entries/{id}",
    params(("id" = String, Path, description = "Sleep entry id")),
    responses(
        (status = 200, description = "Sleep entry deleted", body = MutationResponse),
        (status = 404, description = "Sleep entry not found")
    ),
    tag = "sleep"
)]
pub async fn delete_sleep_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MutationResponse>> {
    super::delete_record::<SleepEntry>(&state, &id).await
}
