use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for writes that echo the stored record back.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SavedResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SavedResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response for deletes and other writes without a payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// `ok`, or `degraded` when the store does not answer.
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub storage: String,
    pub database: String,
    pub uptime_seconds: u64,
}
