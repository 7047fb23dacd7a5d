use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("hubs API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Deserialize)]
struct HubEnvelope {
    hub: Value,
}

#[derive(Debug, Deserialize)]
struct UpdatedEnvelope {
    updated: Value,
}

pub struct HubsClient {
    client: Client,
    base_url: String,
}

impl HubsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Body of `GET /`.
    pub async fn greeting(&self) -> Result<String, SdkError> {
        let resp = self.client.get(format!("{}/", self.base_url)).send().await?;
        Ok(check(resp).await?.text().await?)
    }

    /// Server clock from `GET /now`.
    pub async fn now(&self) -> Result<String, SdkError> {
        let resp = self.client.get(format!("{}/now", self.base_url)).send().await?;
        Ok(check(resp).await?.text().await?)
    }

    pub async fn list(&self) -> Result<Vec<Value>, SdkError> {
        let resp = self.client.get(format!("{}/hubs", self.base_url)).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// `None` when the hub does not exist.
    pub async fn get(&self, id: u64) -> Result<Option<Value>, SdkError> {
        let resp = self
            .client
            .get(format!("{}/hubs/{}", self.base_url, id))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: HubEnvelope = check(resp).await?.json().await?;
        Ok(Some(envelope.hub))
    }

    /// Create a hub and return the stored record.
    pub async fn create(&self, fields: &Map<String, Value>) -> Result<Value, SdkError> {
        let resp = self
            .client
            .post(format!("{}/hubs", self.base_url))
            .json(fields)
            .send()
            .await?;
        let envelope: HubEnvelope = check(resp).await?.json().await?;
        Ok(envelope.hub)
    }

    /// `None` when the hub does not exist.
    pub async fn update(
        &self,
        id: u64,
        changes: &Map<String, Value>,
    ) -> Result<Option<Value>, SdkError> {
        let resp = self
            .client
            .put(format!("{}/hubs/{}", self.base_url, id))
            .json(changes)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: UpdatedEnvelope = check(resp).await?.json().await?;
        Ok(Some(envelope.updated))
    }

    /// `false` when there was nothing to delete.
    pub async fn delete(&self, id: u64) -> Result<bool, SdkError> {
        let resp = self
            .client
            .delete(format!("{}/hubs/{}", self.base_url, id))
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check(resp).await?;
        Ok(true)
    }
}

async fn check(resp: Response) -> Result<Response, SdkError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SdkError::Status { status, body })
}
