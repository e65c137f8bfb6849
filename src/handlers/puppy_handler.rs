use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    db::repo,
    extractors::ApiJson,
    models::{PuppyInfo, SavedResponse},
    AppResult, AppState,
};

#[utoipa::path(
    get,
    path = "/api/puppy-info",
    responses(
        (status = 200, description = "Puppy profile, `{}` when unset", body = PuppyInfo)
    ),
    tag = "puppy"
)]
pub async fn get_puppy_info(State(state): State<Arc<AppState>>) -> AppResult<Json<PuppyInfo>> {
    let info = repo::load_puppy(state.store.as_ref()).await?;
    Ok(Json(info))
}

#[utoipa::path(
    post,
    path = "/api/puppy-info",
    request_body = PuppyInfo,
    responses(
        (status = 200, description = "Puppy profile saved", body = SavedResponse<PuppyInfo>),
        (status = 400, description = "Malformed body or date")
    ),
    tag = "puppy"
)]
pub async fn save_puppy_info(
    State(state): State<Arc<AppState>>,
    ApiJson(info): ApiJson<PuppyInfo>,
) -> AppResult<Json<SavedResponse<PuppyInfo>>> {
    repo::save_puppy(state.store.as_ref(), &info).await?;
    Ok(Json(SavedResponse::new(info)))
}
