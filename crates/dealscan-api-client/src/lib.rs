//! HTTP client for the document extraction service.
//!
//! The service exposes a single endpoint: POST /upload with a multipart body
//! carrying three repeated fields per document — `file` (binary), `doc_types`
//! and `property_types` (strings) — relying on positional pairing across the
//! three sequences. The response is JSON: one object per file, or a bare
//! object when a single file was sent.
//!
//! The engine talks to the service through the [`ExtractionBackend`] trait so
//! tests and headless contexts can substitute the HTTP layer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use dealscan_core::Config;

/// One document's slice of the outbound multipart request. The three parallel
/// sequences the service expects are rebuilt from these in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub doc_type: String,
    pub property_type: String,
}

/// The extraction service boundary. Exactly one invocation per submission;
/// implementations must not retry.
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Send the batch and return the raw JSON response body.
    async fn extract(&self, parts: Vec<FilePart>) -> Result<Value>;
}

/// HTTP client for the extraction service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from configuration (DEALSCAN_API_URL,
    /// DEALSCAN_REQUEST_TIMEOUT_SECS).
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone(), config.request_timeout())
    }

    /// Create a client from environment variables with defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    fn build_form(parts: Vec<FilePart>) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            form = form
                .part(
                    "file",
                    reqwest::multipart::Part::bytes(part.bytes).file_name(part.file_name),
                )
                .text("doc_types", part.doc_type)
                .text("property_types", part.property_type);
        }
        form
    }
}

#[async_trait]
impl ExtractionBackend for ApiClient {
    async fn extract(&self, parts: Vec<FilePart>) -> Result<Value> {
        let url = self.upload_url();
        tracing::info!(url = %url, files = parts.len(), "Sending extraction request");

        let form = Self::build_form(parts);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Extraction request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body)
    }
}
