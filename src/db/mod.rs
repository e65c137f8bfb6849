pub mod file;
pub mod pool;
pub mod postgres;
pub mod repo;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    config::StorageBackend,
    models::{ActiveNap, Collection, Singleton},
    AppResult,
};

pub use file::FileStore;
pub use pool::create_pool;
pub use postgres::PgStore;

/// Persistence for every resource the tracker serves.
///
/// Records travel as JSON values; [`repo`] layers the typed views on top.
/// `replace` and `remove` fail with `AppError::NotFound` when the id is
/// absent, whichever backend is in use.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    async fn list(&self, collection: Collection) -> AppResult<Vec<Value>>;

    async fn upsert(&self, collection: Collection, id: &str, record: Value) -> AppResult<()>;

    async fn replace(&self, collection: Collection, id: &str, record: Value) -> AppResult<()>;

    async fn remove(&self, collection: Collection, id: &str) -> AppResult<()>;

    async fn clear(&self, collection: Collection) -> AppResult<u64>;

    async fn load_singleton(&self, singleton: Singleton) -> AppResult<Option<Value>>;

    async fn save_singleton(&self, singleton: Singleton, value: Value) -> AppResult<()>;

    async fn active_nap(&self) -> AppResult<Option<ActiveNap>>;

    /// Drops any running nap, then records `nap` as the running one.
    async fn start_nap(&self, nap: &ActiveNap) -> AppResult<()>;

    /// Removes the running nap, returning it if there was one.
    async fn clear_nap(&self) -> AppResult<Option<ActiveNap>>;

    async fn ping(&self) -> AppResult<()>;

    async fn close(&self);
}

/// Opens the backend selected by configuration.
pub async fn open_store(backend: &StorageBackend) -> AppResult<Arc<dyn Store>> {
    match backend {
        StorageBackend::Filesystem { dir } => {
            let store = FileStore::open(dir.clone()).await?;
            tracing::info!(dir = %dir.display(), "Using filesystem storage");
            Ok(Arc::new(store))
        }
        StorageBackend::Postgres { url, tls } => {
            let pool = create_pool(url, *tls).await?;
            let store = PgStore::new(pool);
            store.init_schema().await?;
            tracing::info!(tls, "Using PostgreSQL storage");
            Ok(Arc::new(store))
        }
    }
}
