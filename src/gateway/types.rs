//! Wire types for the generative text endpoint.
//!
//! Mirrors the `generateContent` request/response schema. Everything the
//! endpoint contract touches lives here, so schema drift stays inside the
//! gateway boundary.

use serde::{Deserialize, Serialize};

/// Request body for a `generateContent` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Build a request carrying a single prompt string as the sole part.
    pub fn single_prompt(prompt: &str, config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(config),
        }
    }
}

/// One content block of a request or response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One text part of a content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Generation knobs sent with every request.
///
/// Defaults lean deterministic: low temperature, narrow sampling, generous
/// output ceiling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.8,
            max_output_tokens: 8192,
        }
    }
}

/// Response body of a `generateContent` call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// The first text part of the first candidate, if present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        let part = self.candidates.first()?.content.as_ref()?.parts.first()?;
        if part.text.is_empty() {
            None
        } else {
            Some(&part.text)
        }
    }
}

/// One generation candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

/// Error body some endpoint failures carry.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail within an endpoint error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}
