pub mod care;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod startup;
pub mod telemetry;

use std::sync::Arc;

pub use config::{AppConfig, ClientConfig, StorageBackend};
pub use error::{AppError, AppResult};
pub use handlers::MetricsState;

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn db::Store>,
    pub config: AppConfig,
    pub metrics: Arc<MetricsState>,
}
