use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Collection, Record};
use crate::{care::clock, AppError, AppResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SleepLocation {
    #[default]
    Crate,
    Bed,
    Couch,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    #[serde(default)]
    pub id: String,
    pub date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    /// Minutes slept; fractional for naps under a minute.
    pub duration: f64,
    #[serde(default)]
    pub quality: SleepQuality,
    #[serde(default)]
    pub location: SleepLocation,
    #[serde(default)]
    pub puppy_age_weeks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for SleepEntry {
    const COLLECTION: Collection = Collection::Sleep;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> AppResult<()> {
        for (field, value) in [("startTime", &self.start_time), ("endTime", &self.end_time)] {
            if clock::parse_clock(value).is_none() {
                return Err(AppError::Validation(format!(
                    "Invalid {} {:?}, expected HH:MM AM/PM",
                    field, value
                )));
            }
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(AppError::Validation(format!(
                "Sleep duration must be positive, got {}",
                self.duration
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
    fn test_quality_and_location_default() {
        let entry: SleepEntry = serde_json::from_value(json!({
            "id": "s1",
            "date": "2025-11-10T13:00:00Z",
            "startTime": "01:00 PM",
            "endTime": "02:30 PM",
            "duration": 90
        }))
        .unwrap();

        assert_eq!(entry.quality, SleepQuality::Good);
        assert_eq!(entry.location, SleepLocation::Crate);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_non_positive_duration_is_invalid() {
        for duration in [-5.0, 0.0] {
            let entry: SleepEntry = serde_json::from_value(json!({
                "id": "s1",
                "date": "2025-11-10T13:00:00Z",
                "startTime": "01:00 PM",
                "endTime": "01:00 PM",
                "duration": duration
            }))
            .unwrap();

            assert!(
                matches!(entry.validate(), Err(AppError::Validation(_))),
                "duration {} accepted",
                duration
            );
        }
    }
}
