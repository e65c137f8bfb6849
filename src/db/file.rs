use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::Store;
use crate::{
    models::{ActiveNap, Collection, Singleton},
    AppError, AppResult,
};

const ACTIVE_NAP_FILE: &str = "active-nap.json";

/// Keeps each resource in its own pretty-printed JSON file.
pub struct FileStore {
    dir: PathBuf,
    // Writers hold it exclusively for the whole read-modify-write cycle;
    // readers share it so they never see a cycle half done.
    lock: RwLock<()>,
}

impl FileStore {
    /// Opens the store, creating `dir` if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        Ok(Self {
            dir,
            lock: RwLock::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slug))
    }

    /// Reads a file; a missing file or a literal `null` yields `None`.
    async fn read_value(&self, file: &Path) -> AppResult<Option<Value>> {
        match tokio::fs::read(file).await {
            Ok(bytes) => {
                let value: Value = serde_json::from_slice(&bytes)?;
                Ok((!value.is_null()).then_some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes next to `file` and renames over it, so the file is never
    /// observed truncated.
    async fn write_value(&self, file: &Path, value: &Value) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let staging = file.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, file).await?;
        Ok(())
    }

    async fn read_records(&self, collection: Collection) -> AppResult<Vec<Value>> {
        let file = self.path_for(collection.slug());
        match self.read_value(&file).await? {
            Some(Value::Array(records)) => Ok(records),
            Some(_) => Err(AppError::Internal(format!(
                "{} does not hold a JSON array",
                file.display()
            ))),
            None => Ok(Vec::new()),
        }
    }

    async fn write_records(&self, collection: Collection, records: Vec<Value>) -> AppResult<()> {
        self.write_value(&self.path_for(collection.slug()), &Value::Array(records))
            .await
    }
}

fn has_id(record: &Value, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}

#[async_trait]
impl Store for FileStore {
    fn backend(&self) -> &'static str {
        "filesystem"
    }

    async fn list(&self, collection: Collection) -> AppResult<Vec<Value>> {
        let _guard = self.lock.read().await;
        self.read_records(collection).await
    }

    async fn upsert(&self, collection: Collection, id: &str, record: Value) -> AppResult<()> {
        let _guard = self.lock.write().await;
        let mut records = self.read_records(collection).await?;

        match records.iter_mut().find(|existing| has_id(existing, id)) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }

        self.write_records(collection, records).await
    }

    async fn replace(&self, collection: Collection, id: &str, record: Value) -> AppResult<()> {
        let _guard = self.lock.write().await;
        let mut records = self.read_records(collection).await?;

        let existing = records
            .iter_mut()
            .find(|existing| has_id(existing, id))
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", collection, id)))?;
        *existing = record;

        self.write_records(collection, records).await
    }

    async fn remove(&self, collection: Collection, id: &str) -> AppResult<()> {
        let _guard = self.lock.write().await;
        let mut records = self.read_records(collection).await?;

        let before = records.len();
        records.retain(|existing| !has_id(existing, id));
        if records.len() == before {
            return Err(AppError::NotFound(format!("{} {} not found", collection, id)));
        }

        self.write_records(collection, records).await
    }

    async fn clear(&self, collection: Collection) -> AppResult<u64> {
        let _guard = self.lock.write().await;
        let removed = self.read_records(collection).await?.len() as u64;
        self.write_records(collection, Vec::new()).await?;
        Ok(removed)
    }

    async fn load_singleton(&self, singleton: Singleton) -> AppResult<Option<Value>> {
        let _guard = self.lock.read().await;
        self.read_value(&self.path_for(singleton.slug())).await
    }

    async fn save_singleton(&self, singleton: Singleton, value: Value) -> AppResult<()> {
        let _guard = self.lock.write().await;
        self.write_value(&self.path_for(singleton.slug()), &value).await
    }

    async fn active_nap(&self) -> AppResult<Option<ActiveNap>> {
        let _guard = self.lock.read().await;
        match self.read_value(&self.dir.join(ACTIVE_NAP_FILE)).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn start_nap(&self, nap: &ActiveNap) -> AppResult<()> {
        let _guard = self.lock.write().await;
        self.write_value(&self.dir.join(ACTIVE_NAP_FILE), &serde_json::to_value(nap)?)
            .await
    }

    async fn clear_nap(&self) -> AppResult<Option<ActiveNap>> {
        let _guard = self.lock.write().await;
        let file = self.dir.join(ACTIVE_NAP_FILE);

        let previous = match self.read_value(&file).await? {
            Some(value) => Some(serde_json::from_value(value)?),
            None => None,
        };
        self.write_value(&file, &Value::Null).await?;

        Ok(previous)
    }

    async fn ping(&self) -> AppResult<()> {
        tokio::fs::metadata(&self.dir).await?;
        Ok(())
    }

    async fn close(&self) {
        tracing::debug!(dir = %self.dir.display(), "Filesystem store closed");
    }
}
