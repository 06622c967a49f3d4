use super::{ApiError, Backend};
use crate::backend::types::{ErrorBody, HealthOut, ScanOut, ScoredItem};
use crate::config::Config;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::debug;

/// Message surfaced when a non-success response carries no structured error.
const GENERIC_FAILURE: &str = "Request failed";

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// No request timeout is configured: the backend owns request-level
    /// reliability, and a hung request is left to the caller to observe.
    pub fn new(cfg: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: cfg.backend.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(ApiError::from);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        Err(ApiError::Api { status, message })
    }
}

impl Backend for HttpBackend {
    async fn health(&self) -> Result<HealthOut, ApiError> {
        let url = self.url("/api/health");
        debug!(%url, "health probe");
        let response = self.client.get(url).send().await?;
        Self::parse(response).await
    }

    async fn predict(&self, payload: &str) -> Result<ScoredItem, ApiError> {
        let url = self.url("/api/predict");
        debug!(%url, payload_len = payload.len(), "predict request");
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "payload": payload }))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn scan_image(&self, filename: &str, bytes: Vec<u8>) -> Result<Vec<ScoredItem>, ApiError> {
        let url = self.url("/api/scan-image");
        debug!(%url, filename, image_bytes = bytes.len(), "scan-image request");
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        let response = self.client.post(url).multipart(form).send().await?;
        let out: ScanOut = Self::parse(response).await?;
        Ok(out.results)
    }
}
