use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::models::{
    ActiveNap, Collection, EndedNap, HealthStatus, PuppyInfo, Record, SavedResponse, SyncSnapshot,
    TrainingProgram,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Mirror I/O failed: {0}")]
    Mirror(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Thin typed wrapper over the REST endpoints.
#[derive(Clone, Debug)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and turns non-2xx answers into `ClientError::Status`,
    /// using the server's `{error}` text when present.
    async fn send(request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(body);

        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = Self::send(self.http.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Response> {
        Self::send(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn sync(&self) -> ClientResult<SyncSnapshot> {
        self.get_json("/api/sync").await
    }

    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.get_json("/api/health").await
    }

    pub async fn save_training(&self, program: &TrainingProgram) -> ClientResult<()> {
        self.post_json("/api/training-tasks", program).await?;
        Ok(())
    }

    /// POST to the record's collection; the server upserts by id.
    pub async fn save_record<T: Record>(&self, record: &T) -> ClientResult<()> {
        self.post_json(&T::COLLECTION.api_path(), record).await?;
        Ok(())
    }

    pub async fn update_record<T: Record>(&self, record: &T) -> ClientResult<()> {
        let path = format!("{}/{}", T::COLLECTION.api_path(), record.id());
        Self::send(self.http.put(self.url(&path)).json(record)).await?;
        Ok(())
    }

    pub async fn delete_record(&self, collection: Collection, id: &str) -> ClientResult<()> {
        let path = format!("{}/{}", collection.api_path(), id);
        Self::send(self.http.delete(self.url(&path))).await?;
        Ok(())
    }

    pub async fn clear_collection(&self, collection: Collection) -> ClientResult<()> {
        Self::send(self.http.delete(self.url(&collection.api_path()))).await?;
        Ok(())
    }

    pub async fn save_puppy(&self, info: &PuppyInfo) -> ClientResult<()> {
        self.post_json("/api/puppy-info", info).await?;
        Ok(())
    }

    pub async fn active_nap(&self) -> ClientResult<Option<ActiveNap>> {
        self.get_json("/api/active-nap").await
    }

    pub async fn start_nap(&self) -> ClientResult<ActiveNap> {
        let response = self.post_json("/api/active-nap/start", &()).await?;
        let saved: SavedResponse<ActiveNap> = response.json().await?;
        Ok(saved.data)
    }

    pub async fn stop_nap(&self) -> ClientResult<Option<EndedNap>> {
        let response = self.post_json("/api/active-nap/stop", &()).await?;
        let saved: SavedResponse<Option<EndedNap>> = response.json().await?;
        Ok(saved.data)
    }

    pub async fn cancel_nap(&self) -> ClientResult<()> {
        self.post_json("/api/active-nap/cancel", &()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let api = HttpApi::new("http://localhost:3001/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("/api/sync"), "http://localhost:3001/api/sync");
    }
}
