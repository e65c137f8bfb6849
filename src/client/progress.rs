//! Exporting and importing training progress and the food log as a JSON file.

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use super::{state, ClientResult, MirrorKey, SyncClient};
use crate::care::training;
use crate::models::{Collection, FoodEntry, Record, TrainingProgram};

/// Contents of an exported progress file. Either part may be missing on import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<TrainingProgram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_entries: Option<Vec<FoodEntry>>,
}

impl SyncClient {
    /// Pretty-printed training progress and food log.
    pub async fn export_progress(&self) -> ClientResult<String> {
        let file = {
            let state = self.inner.state.read().await;
            ProgressFile {
                tasks: Some(state.training.clone()),
                food_entries: Some(state.food_entries.clone()),
            }
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Loads an exported file. Tasks are laid over the default program;
    /// food entries replace the current log, locally and on the server.
    /// Nothing changes when `json` does not parse.
    pub async fn import_progress(&self, json: &str) -> ClientResult<Vec<JoinHandle<()>>> {
        let file: ProgressFile = serde_json::from_str(json)?;
        let mut writes = Vec::new();

        if let Some(tasks) = file.tasks {
            let program = training::merge_with_defaults(&tasks, &training::default_program());
            self.inner.state.write().await.training = program.clone();
            self.mirror(MirrorKey::Training, &program).await;

            let inner = self.inner.clone();
            writes.push(self.spawn_write("import training tasks", async move {
                inner.api.save_training(&program).await
            }));
        }

        if let Some(mut entries) = file.food_entries {
            entries.iter_mut().for_each(FoodEntry::ensure_id);
            state::sort_food(&mut entries);
            self.inner.state.write().await.food_entries = entries.clone();
            self.mirror(MirrorKey::Food, &entries).await;

            let inner = self.inner.clone();
            writes.push(self.spawn_write("import food entries", async move {
                inner.api.clear_collection(Collection::Food).await?;
                for entry in &entries {
                    inner.api.save_record(entry).await?;
                }
                Ok(())
            }));
        }

        tracing::info!(writes = writes.len(), "Progress imported");
        Ok(writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, HttpApi, LocalMirror};
    use chrono::{FixedOffset, TimeZone, Utc};

    async fn offline_client() -> SyncClient {
        let api = HttpApi::new("http://127.0.0.1:9", std::time::Duration::from_millis(200)).unwrap();
        let dir = std::env::temp_dir().join(format!("puppy-progress-{}", uuid::Uuid::new_v4()));
        let mirror = LocalMirror::open(dir).await.unwrap();
        SyncClient::new(api, mirror, FixedOffset::east_opt(0).unwrap())
    }

    #[tokio::test]
    async fn test_export_then_import_restores_progress() {
        let source = offline_client().await;
        source.toggle_training_task("w2t1").await.unwrap().await.unwrap();
        let noon = Utc.with_ymd_and_hms(2025, 11, 10, 12, 0, 0).unwrap();
        let mut entry = source.new_food_entry_for(noon).await;
        entry.feeding_times[1].completed = true;
        source.add_food_entry(entry).await.await.unwrap();

        let exported = source.export_progress().await.unwrap();

        let target = offline_client().await;
        for write in target.import_progress(&exported).await.unwrap() {
            write.await.unwrap();
        }

        let expected = source.state().await;
        let imported = target.state().await;
        assert_eq!(imported.training, expected.training);
        assert_eq!(imported.food_entries, expected.food_entries);
    }

    #[tokio::test]
    async fn test_partial_tasks_are_merged_with_defaults() {
        let client = offline_client().await;
        let json = r#"{
            "tasks": {
                "1": [{
                    "id": "w1t2",
                    "title": "Old title",
                    "description": "",
                    "category": "Crate Training",
                    "difficulty": "Easy",
                    "completed": true
                }]
            }
        }"#;

        let writes = client.import_progress(json).await.unwrap();
        assert_eq!(writes.len(), 1);

        let state = client.state().await;
        assert_eq!(state.training.tasks().count(), training::default_program().tasks().count());
        assert!(state.training.find("w1t2").unwrap().completed);
        assert!(!state.training.find("w1t1").unwrap().completed);
        assert!(state.food_entries.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_changes_nothing() {
        let client = offline_client().await;
        client.toggle_training_task("w1t1").await.unwrap().await.unwrap();
        let before = client.state().await;

        let result = client.import_progress("{ not json").await;
        assert!(matches!(result, Err(ClientError::Json(_))));
        assert_eq!(client.state().await, before);
    }
}
