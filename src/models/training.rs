use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TaskCategory {
    #[serde(rename = "Potty Training")]
    PottyTraining,
    #[serde(rename = "Crate Training")]
    CrateTraining,
    Socialization,
    Obedience,
    #[serde(rename = "Chewing/Biting")]
    ChewingBiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrainingTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub completed: bool,
}

/// Training tasks grouped by week number. Serialized as a JSON object keyed
/// by the week number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TrainingProgram(pub BTreeMap<u32, Vec<TrainingTask>>);

impl TrainingProgram {
    pub fn tasks(&self) -> impl Iterator<Item = &TrainingTask> {
        self.0.values().flatten()
    }

    pub fn find(&self, task_id: &str) -> Option<&TrainingTask> {
        self.tasks().find(|task| task.id == task_id)
    }

    pub fn find_mut(&mut self, task_id: &str) -> Option<&mut TrainingTask> {
        self.0.values_mut().flatten().find(|task| task.id == task_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(task) = self.tasks().find(|task| task.id.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "Training task \"{}\" has an empty id",
                task.title
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_program_serializes_with_week_keys() {
        let program: TrainingProgram = serde_json::from_value(json!({
            "2": [{
                "id": "w2t1",
                "title": "Start potty training",
                "description": "Establish a regular potty routine.",
                "category": "Potty Training",
                "difficulty": "Medium",
                "completed": true
            }]
        }))
        .unwrap();

        let task = program.find("w2t1").unwrap();
        assert_eq!(task.category, TaskCategory::PottyTraining);
        assert!(task.completed);

        let value = serde_json::to_value(&program).unwrap();
        assert_eq!(value["2"][0]["category"], "Potty Training");
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result: Result<TrainingTask, _> = serde_json::from_value(json!({
            "id": "x",
            "title": "t",
            "description": "d",
            "category": "Agility",
            "difficulty": "Easy"
        }));
        assert!(result.is_err());
    }
}
