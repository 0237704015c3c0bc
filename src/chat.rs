//! Chat backend client
//!
//! Thin client for the external chat collaborator. The backend itself is an
//! opaque HTTP service; this module only speaks its one-request contract:
//! `POST {endpoint}` with `{ "text" }`, answered by `{ "reply" }`. Like the
//! translation service, [`ChatClient::ask`] is total — any failure yields a
//! static apology instead of an error.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Shown to the user when the chat backend is unreachable or misbehaves.
pub const APOLOGY: &str = "Sorry, I'm having trouble connecting to my brain. Is the backend running?";

#[derive(Serialize)]
struct ChatRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

/// Client for the floating chatbot's backend endpoint
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Client for the given chat endpoint (e.g. `http://localhost:8000/chat`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Self::DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one user message and return the reply, or the apology on any
    /// failure.
    pub async fn ask(&self, text: &str) -> String {
        match self.request(text).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(endpoint = %self.endpoint, %err, "chat request failed");
                APOLOGY.to_string()
            }
        }
    }

    async fn request(&self, text: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { text })
            .send()
            .await?
            .error_for_status()?;
        let parsed: ChatReply = response.json().await?;
        Ok(parsed.reply)
    }
}
