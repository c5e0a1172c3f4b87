//! `Repository` over the JSON API in `routes::files`.
//!
//! Error responses carry `{ "error", "detail" }`; the status code selects the
//! `AppError` variant so callers see the same kinds as with the in-memory
//! store.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::backend::Repository;
use crate::error::{AppError, Result};
use crate::models::{FlatRecord, MoveRequest, NodeId, RenameRequest};

pub const DEFAULT_URL: &str = "http://127.0.0.1:3001";

pub struct HttpRepository {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    /// Turn a non-success response into the matching `AppError`.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await?;
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.detail)
            .unwrap_or(text);
        tracing::debug!("Backend answered {}: {}", status, detail);
        Err(AppError::from_status(status, detail))
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let resp = Self::check(resp).await?;
        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl Repository for HttpRepository {
    async fn fetch_all(&self) -> Result<Vec<FlatRecord>> {
        let resp = self.client.get(self.url("files")).send().await?;
        Self::decode(resp).await
    }

    async fn rename(&self, id: NodeId, name: &str) -> Result<FlatRecord> {
        let resp = self
            .client
            .post(self.url(&format!("files/{}/rename", id)))
            .json(&RenameRequest {
                name: name.to_string(),
            })
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn move_to(&self, id: NodeId, destination_id: NodeId) -> Result<FlatRecord> {
        let resp = self
            .client
            .post(self.url(&format!("files/{}/move", id)))
            .json(&MoveRequest { destination_id })
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn delete(&self, id: NodeId) -> Result<()> {
        let resp = self
            .client
            .delete(self.url(&format!("files/{}", id)))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}
