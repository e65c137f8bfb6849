//! Typed views over [`Store`].

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::Store;
use crate::{
    models::{
        DailyTodoEntry, FoodEntry, PottyEntry, PuppyInfo, Record, Singleton, SleepEntry,
        SyncSnapshot, TrainingProgram,
    },
    AppResult,
};

/// Decodes stored records, skipping any that no longer match the type.
fn decode_all<T: Record>(values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(collection = T::COLLECTION.slug(), error = %e, "Skipping unreadable record");
                None
            }
        })
        .collect()
}

pub async fn list<T: Record>(store: &dyn Store) -> AppResult<Vec<T>> {
    let values = store.list(T::COLLECTION).await?;
    Ok(decode_all(values))
}

pub async fn upsert<T: Record>(store: &dyn Store, record: &T) -> AppResult<()> {
    let value = serde_json::to_value(record)?;
    store.upsert(T::COLLECTION, record.id(), value).await
}

pub async fn replace<T: Record>(store: &dyn Store, record: &T) -> AppResult<()> {
    let value = serde_json::to_value(record)?;
    store.replace(T::COLLECTION, record.id(), value).await
}

pub async fn remove<T: Record>(store: &dyn Store, id: &str) -> AppResult<()> {
    store.remove(T::COLLECTION, id).await
}

pub async fn clear<T: Record>(store: &dyn Store) -> AppResult<u64> {
    store.clear(T::COLLECTION).await
}

async fn load_singleton<T>(store: &dyn Store, singleton: Singleton) -> AppResult<T>
where
    T: DeserializeOwned + Default,
{
    let Some(value) = store.load_singleton(singleton).await? else {
        return Ok(T::default());
    };

    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            tracing::warn!(resource = singleton.slug(), error = %e, "Ignoring unreadable snapshot");
            Ok(T::default())
        }
    }
}

async fn save_singleton<T: Serialize>(
    store: &dyn Store,
    singleton: Singleton,
    value: &T,
) -> AppResult<()> {
    store
        .save_singleton(singleton, serde_json::to_value(value)?)
        .await
}

pub async fn load_training(store: &dyn Store) -> AppResult<TrainingProgram> {
    load_singleton(store, Singleton::TrainingTasks).await
}

pub async fn save_training(store: &dyn Store, program: &TrainingProgram) -> AppResult<()> {
    save_singleton(store, Singleton::TrainingTasks, program).await
}

pub async fn load_puppy(store: &dyn Store) -> AppResult<PuppyInfo> {
    load_singleton(store, Singleton::PuppyInfo).await
}

pub async fn save_puppy(store: &dyn Store, info: &PuppyInfo) -> AppResult<()> {
    save_singleton(store, Singleton::PuppyInfo, info).await
}

/// Reads every resource. Each read is independent; the result is not a
/// point-in-time snapshot.
pub async fn snapshot(store: &dyn Store) -> AppResult<SyncSnapshot> {
    let (training_tasks, food_entries, potty_entries, sleep_entries, puppy_info, todo_entries, active_nap) = tokio::try_join!(
        load_training(store),
        list::<FoodEntry>(store),
        list::<PottyEntry>(store),
        list::<SleepEntry>(store),
        load_puppy(store),
        list::<DailyTodoEntry>(store),
        store.active_nap(),
    )?;

    Ok(SyncSnapshot {
        training_tasks,
        food_entries,
        potty_entries,
        sleep_entries,
        puppy_info,
        todo_entries,
        active_nap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FileStore;
    use crate::models::{Collection, PottyLocation, PottyType};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    async fn temp_store() -> FileStore {
        let dir = std::env::temp_dir().join(format!("puppy-repo-{}", uuid::Uuid::new_v4()));
        FileStore::open(dir).await.unwrap()
    }

    fn potty(id: &str) -> PottyEntry {
        PottyEntry {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2025, 11, 10, 8, 0, 0).unwrap(),
            time: "08:00 AM".to_string(),
            kind: PottyType::Pee,
            location: PottyLocation::Outside,
            context: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_unreadable_records_are_skipped() {
        let store = temp_store().await;
        upsert(&store, &potty("good")).await.unwrap();
        store
            .upsert(Collection::Potty, "bad", json!({ "id": "bad", "type": "sneeze" }))
            .await
            .unwrap();

        let entries: Vec<PottyEntry> = list(&store).await.unwrap();
        assert_eq!(entries, vec![potty("good")]);

        // The raw record is left alone.
        assert_eq!(store.list(Collection::Potty).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_store_snapshot() {
        let store = temp_store().await;
        let snapshot = snapshot(&store).await.unwrap();
        assert_eq!(snapshot, SyncSnapshot::default());
    }

    #[tokio::test]
    async fn test_puppy_info_round_trip() {
        let store = temp_store().await;
        let info = PuppyInfo {
            name: Some("Koda".to_string()),
            ..PuppyInfo::default()
        };

        save_puppy(&store, &info).await.unwrap();
        assert_eq!(load_puppy(&store).await.unwrap(), info);
    }
}
