use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ActiveNap, DailyTodoEntry, FoodEntry, PottyEntry, PuppyInfo, SleepEntry, TrainingProgram};

/// Every resource in one payload, as served by `GET /api/sync`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    #[serde(default)]
    pub training_tasks: TrainingProgram,
    #[serde(default)]
    pub food_entries: Vec<FoodEntry>,
    #[serde(default)]
    pub potty_entries: Vec<PottyEntry>,
    #[serde(default)]
    pub sleep_entries: Vec<SleepEntry>,
    #[serde(default)]
    pub puppy_info: PuppyInfo,
    #[serde(default)]
    pub todo_entries: Vec<DailyTodoEntry>,
    #[serde(default)]
    pub active_nap: Option<ActiveNap>,
}
