pub mod food_handler;
pub mod health;
pub mod metrics;
pub mod nap_handler;
pub mod potty_handler;
pub mod puppy_handler;
pub mod sleep_handler;
pub mod sync_handler;
pub mod todo_handler;
pub mod training_handler;

pub use health::health_check;
pub use metrics::{metrics_handler, setup_metrics_recorder, MetricsState};

use axum::Json;

use crate::{
    db::repo,
    models::{MutationResponse, Record, SavedResponse},
    AppError, AppResult, AppState,
};

// Shared bodies for the id-keyed list resources. The per-resource handlers
// stay thin so each keeps its own OpenAPI annotation.

/// POST: insert or overwrite by id, assigning one when missing.
pub(crate) async fn save_record<T: Record>(
    state: &AppState,
    mut record: T,
) -> AppResult<Json<SavedResponse<T>>> {
    record.ensure_id();
    record.validate()?;

    repo::upsert(state.store.as_ref(), &record).await?;
    tracing::debug!(collection = T::COLLECTION.slug(), id = record.id(), "Record saved");

    Ok(Json(SavedResponse::new(record)))
}

/// PUT: overwrite an existing record. The body id may be omitted but must
/// not contradict the path.
pub(crate) async fn replace_record<T: Record>(
    state: &AppState,
    id: String,
    mut record: T,
) -> AppResult<Json<SavedResponse<T>>> {
    if record.id().is_empty() {
        record.set_id(id);
    } else if record.id() != id {
        return Err(AppError::BadRequest(format!(
            "Body id {} does not match path id {}",
            record.id(),
            id
        )));
    }
    record.validate()?;

    repo::replace(state.store.as_ref(), &record).await?;
    tracing::debug!(collection = T::COLLECTION.slug(), id = record.id(), "Record replaced");

    Ok(Json(SavedResponse::new(record)))
}

pub(crate) async fn delete_record<T: Record>(
    state: &AppState,
    id: &str,
) -> AppResult<Json<MutationResponse>> {
    repo::remove::<T>(state.store.as_ref(), id).await?;
    tracing::debug!(collection = T::COLLECTION.slug(), id, "Record deleted");

    Ok(Json(MutationResponse::ok(format!("Deleted {}", T::COLLECTION))))
}

pub(crate) async fn clear_records<T: Record>(state: &AppState) -> AppResult<Json<MutationResponse>> {
    let removed = repo::clear::<T>(state.store.as_ref()).await?;
    tracing::info!(collection = T::COLLECTION.slug(), removed, "Collection cleared");

    Ok(Json(MutationResponse::ok(format!(
        "Deleted {} {}",
        removed,
        T::COLLECTION.slug().replace('-', " ")
    ))))
}
