use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    db::repo,
    extractors::ApiJson,
    models::{SavedResponse, TrainingProgram},
    AppResult, AppState,
};

/// GET /api/training-tasks - Saved program as stored, `{}` when never saved
#[utoipa::path(
    get,
    path = "/api/training-tasks",
    responses(
        (status = 200, description = "Training tasks keyed by week", body = TrainingProgram)
    ),
    tag = "training"
)]
pub async fn get_training_tasks(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<TrainingProgram>> {
    let program = repo::load_training(state.store.as_ref()).await?;
    Ok(Json(program))
}

/// POST /api/training-tasks - Replace the whole program
#[utoipa::path(
    post,
    path = "/api/training-tasks",
    request_body = TrainingProgram,
    responses(
        (status = 200, description = "Training tasks saved", body = SavedResponse<TrainingProgram>),
        (status = 422, description = "A task has no id")
    ),
    tag = "training"
)]
pub async fn save_training_tasks(
    State(state): State<Arc<AppState>>,
    ApiJson(program): ApiJson<TrainingProgram>,
) -> AppResult<Json<SavedResponse<TrainingProgram>>> {
    program.validate()?;
    repo::save_training(state.store.as_ref(), &program).await?;

    let completed = program.tasks().filter(|task| task.completed).count();
    tracing::debug!(completed, "Training tasks saved");

    Ok(Json(SavedResponse::new(program)))
}
