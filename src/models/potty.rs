use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Collection, Record};
use crate::{care::clock, AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PottyType {
    Pee,
    Poop,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PottyLocation {
    Outside,
    Inside,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PottyEntry {
    #[serde(default)]
    pub id: String,
    pub date: DateTime<Utc>,
    /// 12-hour clock, e.g. "08:00 AM".
    pub time: String,
    #[serde(rename = "type")]
    pub kind: PottyType,
    pub location: PottyLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PottyEntry {
    pub fn is_accident(&self) -> bool {
        self.location == PottyLocation::Inside
    }
}

impl Record for PottyEntry {
    const COLLECTION: Collection = Collection::Potty;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> AppResult<()> {
        if clock::parse_clock(&self.time).is_none() {
            return Err(AppError::Validation(format!(
                "Invalid time {:?}, expected HH:MM AM/PM",
                self.time
            )));
        }
        Ok(())
    }
}
