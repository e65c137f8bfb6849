use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    db::repo,
    extractors::ApiJson,
    models::{DailyTodoEntry, SavedResponse},
    AppResult, AppState,
};

/// GET /api/todo-entries - Most recently touched day first on Postgres
#[utoipa::path(
    get,
    path = "/api/todo-entries",
    responses(
        (status = 200, description = "Daily checklist entries", body = Vec<DailyTodoEntry>)
    ),
    tag = "todo"
)]
pub async fn get_todo_entries(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<DailyTodoEntry>>> {
    let entries = repo::list::<DailyTodoEntry>(state.store.as_ref()).await?;
    Ok(Json(entries))
}

/// POST /api/todo-entries - Add or update the checklist for a day
#[utoipa::path(
    post,
    path = "/api/todo-entries",
    request_body = DailyTodoEntry,
    responses(
        (status = 200, description = "Checklist saved", body = SavedResponse<DailyTodoEntry>),
        (status = 422, description = "A schedule item appears twice")
    ),
    tag = "todo"
)]
pub async fn save_todo_entry(
    State(state): State<Arc<AppState>>,
    ApiJson(entry): ApiJson<DailyTodoEntry>,
) -> AppResult<Json<SavedResponse<DailyTodoEntry>>> {
    super::save_record(&state, entry).await
}
