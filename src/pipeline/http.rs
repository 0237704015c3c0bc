//! HTTP translation backend
//!
//! Client for the textbook's translation API:
//!
//! - `POST {base}/api/v1/translate` with `{ "text", "target_lang" }`,
//!   answered by `{ "translated_text", ... }`
//! - `POST {base}/api/v1/translate-bulk` with `{ "texts", "target_lang" }`,
//!   answered by `{ "translated_texts", ... }` in request order
//! - `GET {base}/api/v1/translate/health`
//!
//! Extra response fields (`original_text`, `target_lang`) are ignored.
//! Every failure mode here is a typed [`TranslateError`]; the service layer
//! is responsible for degrading to the fallback table.

use crate::language::Language;
use crate::pipeline::error::{TranslateError, TranslateResult};
use crate::pipeline::translator::TranslationBackend;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Serialize)]
struct BulkTranslateRequest<'a> {
    texts: &'a [String],
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct BulkTranslateResponse {
    translated_texts: Vec<String>,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

/// Translation backend talking to the textbook's HTTP API
///
/// Supports single and bulk translations with transparent request chunking
/// and a request timeout so a dead backend cannot leave callers suspended
/// indefinitely.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Maximum number of texts per bulk request; larger batches are chunked.
    const MAX_BATCH_SIZE: usize = 128;

    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a backend for the given base URL (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>) -> TranslateResult<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Create a backend with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> TranslateResult<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(TranslateError::Config(
                "Backend base URL cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslateError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a backend from the `TARJUMA_API_URL` environment variable.
    pub fn from_env() -> TranslateResult<Self> {
        let base_url = std::env::var("TARJUMA_API_URL").map_err(|_| {
            TranslateError::Config("TARJUMA_API_URL environment variable not set".to_string())
        })?;
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the backend's health route.
    pub async fn health(&self) -> TranslateResult<bool> {
        let url = format!("{}/api/v1/translate/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let health: HealthResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Protocol(format!("Malformed health response: {}", e)))?;
        Ok(health.status == "ok")
    }

    fn chunk_batch(texts: &[String]) -> Vec<&[String]> {
        texts.chunks(Self::MAX_BATCH_SIZE).collect()
    }

    /// Map a non-2xx response to an error, preserving the body for context.
    async fn status_error(response: reqwest::Response) -> TranslateError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        if status.is_client_error() {
            TranslateError::Config(format!("API client error ({}): {}", status, body))
        } else {
            TranslateError::Translation(format!("API server error ({}): {}", status, body))
        }
    }

    async fn translate_chunk(
        &self,
        texts: &[String],
        target: Language,
    ) -> TranslateResult<Vec<String>> {
        let url = format!("{}/api/v1/translate-bulk", self.base_url);
        let body = BulkTranslateRequest {
            texts,
            target_lang: target.code(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let parsed: BulkTranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Protocol(format!("Malformed bulk response: {}", e)))?;

        if parsed.translated_texts.len() != texts.len() {
            return Err(TranslateError::Protocol(format!(
                "Bulk response length mismatch: sent {}, received {}",
                texts.len(),
                parsed.translated_texts.len()
            )));
        }

        Ok(parsed.translated_texts)
    }
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationBackend for HttpBackend {
    async fn translate(&self, text: &str, target: Language) -> TranslateResult<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let url = format!("{}/api/v1/translate", self.base_url);
        let body = TranslateRequest {
            text,
            target_lang: target.code(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Protocol(format!("Malformed response: {}", e)))?;

        Ok(parsed.translated_text)
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target: Language,
    ) -> TranslateResult<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_results = Vec::with_capacity(texts.len());
        for chunk in Self::chunk_batch(texts) {
            let chunk_results = self.translate_chunk(chunk, target).await?;
            all_results.extend(chunk_results);
        }

        debug_assert_eq!(all_results.len(), texts.len());
        Ok(all_results)
    }

    fn backend_name(&self) -> &str {
        "HTTP Backend"
    }
}
