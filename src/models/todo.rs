use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use super::{Collection, Record};
use crate::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub schedule_item_id: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Checklist state for one calendar day of the daily schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyTodoEntry {
    #[serde(default)]
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<TodoItem>,
}

impl DailyTodoEntry {
    /// Flips one item, stamping or clearing its completion time. Returns
    /// false when the schedule item is not part of this entry.
    pub fn toggle(&mut self, schedule_item_id: &str, now: DateTime<Utc>) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| item.schedule_item_id == schedule_item_id)
        {
            Some(item) => {
                item.completed = !item.completed;
                item.completed_at = item.completed.then_some(now);
                true
            }
            None => false,
        }
    }
}

impl Record for DailyTodoEntry {
    const COLLECTION: Collection = Collection::Todo;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.schedule_item_id.as_str()) {
                return Err(AppError::Validation(format!(
                    "Schedule item {} appears more than once",
                    item.schedule_item_id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> DailyTodoEntry {
        DailyTodoEntry {
            id: "t1".to_string(),
            date: Utc.with_ymd_and_hms(2025, 11, 10, 0, 0, 0).unwrap(),
            items: vec![
                TodoItem {
                    schedule_item_id: "breakfast".to_string(),
                    completed: false,
                    completed_at: None,
                },
                TodoItem {
                    schedule_item_id: "lunch".to_string(),
                    completed: false,
                    completed_at: None,
                },
            ],
        }
    }

    #[test]
    fn test_toggle_stamps_and_clears() {
        let mut entry = entry();
        let now = Utc.with_ymd_and_hms(2025, 11, 10, 7, 20, 0).unwrap();

        assert!(entry.toggle("breakfast", now));
        assert!(entry.items[0].completed);
        assert_eq!(entry.items[0].completed_at, Some(now));

        assert!(entry.toggle("breakfast", now));
        assert!(!entry.items[0].completed);
        assert_eq!(entry.items[0].completed_at, None);

        assert!(!entry.toggle("dinner", now));
    }

    #[test]
    fn test_duplicate_items_are_invalid() {
        let mut entry = entry();
        entry.items[1].schedule_item_id = "breakfast".to_string();
        assert!(entry.validate().is_err());
    }
}
