use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Collection, Record};
use crate::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedingTime {
    pub time: String,
    #[serde(default)]
    pub completed: bool,
    /// Portion in cups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    #[serde(default)]
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puppy_age_weeks: Option<u32>,
    #[serde(default)]
    pub feeding_times: Vec<FeedingTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for FoodEntry {
    const COLLECTION: Collection = Collection::Food;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> AppResult<()> {
        for slot in &self.feeding_times {
            if slot.time.trim().is_empty() {
                return Err(AppError::Validation(
                    "Feeding time label must not be empty".to_string(),
                ));
            }
            if let Some(amount) = slot.amount {
                if !amount.is_finite() || amount < 0.0 {
                    return Err(AppError::Validation(format!(
                        "Invalid amount {} for feeding time {}",
                        amount, slot.time
                    )));
                }
            }
        }
        Ok(())
    }
}
