//! HTTP client for the generative text endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::types::{
    ApiErrorResponse, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};

/// Result type for gateway client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the generative endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connectivity, DNS, timeout).
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("endpoint returned {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
    },

    /// Response body did not match the expected schema.
    #[error("failed to parse response: {0}")]
    ParseError(String),
}

/// Client for a Gemini-style `generateContent` endpoint.
///
/// The API key is injected at construction and sent as a query parameter;
/// it is never logged.
#[derive(Debug, Clone)]
pub struct GenerativeClient {
    client: Client,
    /// Base URL up to and excluding `/models` (e.g.
    /// `https://generativelanguage.googleapis.com/v1beta`).
    base_url: String,
    /// Model identifier (e.g. `gemini-2.0-flash`).
    model: String,
    api_key: String,
    generation: GenerationConfig,
}

impl GenerativeClient {
    /// Create a new client.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        generation: GenerationConfig,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            generation,
        })
    }

    /// Send one prompt and return the first candidate's first text part.
    ///
    /// `Ok(None)` means the endpoint answered successfully but produced no
    /// usable text.
    pub async fn generate(&self, prompt: &str) -> ClientResult<Option<String>> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = GenerateContentRequest::single_prompt(prompt, self.generation);

        debug!(model = %self.model, prompt_len = prompt.len(), "sending generation request");
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => "unreadable error body".to_string(),
            };
            return Err(ClientError::Status { status, message });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))?;

        Ok(body.first_text().map(str::to_string))
    }
}
