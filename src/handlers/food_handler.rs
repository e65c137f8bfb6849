use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    db::repo,
    extractors::ApiJson,
    models::{FoodEntry, MutationResponse, SavedResponse},
    AppResult, AppState,
};

/// GET /api/food-entries
#[utoipa::path(
    get,
    path = "/api/food-entries",
    responses(
        (status = 200, description = "All food entries", body = Vec<FoodEntry>)
    ),
    tag = "food"
)]
pub async fn get_food_entries(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<FoodEntry>>> {
    let entries = repo::list::<FoodEntry>(state.store.as_ref()).await?;
    Ok(Json(entries))
}

/// POST /api/food-entries - Add a food entry, or overwrite the one with the same id
#[utoipa::path(
    post,
    path = "/api/food-entries",
    request_body = FoodEntry,
    responses(
        (status = 200, description = "Food entry saved", body = SavedResponse<FoodEntry>),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Invalid feeding amount or label")
    ),
    tag = "food"
)]
pub async fn create_food_entry(
    State(state): State<Arc<AppState>>,
    ApiJson(entry): ApiJson<FoodEntry>,
) -> AppResult<Json<SavedResponse<FoodEntry>>> {
    super::save_record(&state, entry).await
}

/// PUT /api/food-entries/{id}
#[utoipa::path(
    put,
    path = "/api/food-entries/{id}",
    params(("id" = String, Path, description = "Food entry id")),
    request_body = FoodEntry,
    responses(
        (status = 200, description = "Food entry replaced", body = SavedResponse<FoodEntry>),
        (status = 400, description = "Body id does not match path"),
        (status = 404, description = "Food entry not found")
    ),
    tag = "food"
)]
pub async fn update_food_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(entry): ApiJson<FoodEntry>,
) -> AppResult<Json<SavedResponse<FoodEntry>>> {
    super::replace_record(&state, id, entry).await
}

/// DELETE /api/food-entries/{id}
#[utoipa::path(
    delete,
    path = "/api/food-entries/{id}",
    params(("id" = String, Path, description = "Food entry id")),
    responses(
        (status = 200, description = "Food entry deleted", body = MutationResponse),
        (status = 404, description = "Food entry not found")
    ),
    tag = "food"
)]
pub async fn delete_food_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MutationResponse>> {
    super::delete_record::<FoodEntry>(&state, &id).await
}

/// DELETE /api/food-entries - Remove every food entry
#[utoipa::path(
    delete,
    path = "/api/food-entries",
    responses(
        (status = 200, description = "All food entries deleted", body = MutationResponse)
    ),
    tag = "food"
)]
pub async fn delete_all_food_entries(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<MutationResponse>> {
    super::clear_records::<FoodEntry>(&state).await
}
