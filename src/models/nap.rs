use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// The nap timer currently running, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveNap {
    pub id: String,
    pub start_time: DateTime<Utc>,
}

impl ActiveNap {
    pub fn start_now() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start_time: Utc::now(),
        }
    }

    pub fn end_at(self, end_time: DateTime<Utc>) -> EndedNap {
        let elapsed = end_time.signed_duration_since(self.start_time);
        let duration_minutes = (elapsed.num_milliseconds().max(0) as f64) / 60_000.0;

        EndedNap {
            id: self.id,
            start_time: self.start_time,
            end_time,
            duration_minutes,
        }
    }
}

/// A nap that was stopped, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndedNap {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_end_at_computes_minutes() {
        let nap = ActiveNap::start_now();
        let end = nap.start_time + Duration::seconds(90);
        let ended = nap.clone().end_at(end);

        assert_eq!(ended.id, nap.id);
        assert!((ended.duration_minutes - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clock_skew_never_goes_negative() {
        let nap = ActiveNap::start_now();
        let end = nap.start_time - Duration::minutes(3);
        assert_eq!(nap.end_at(end).duration_minutes, 0.0);
    }
}
