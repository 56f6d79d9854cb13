//! Client for the Google Gemini REST API.
//!
//! Three operations, all single-shot over `generativelanguage.googleapis.com`:
//!
//! * [`GeminiClient::generate_content`] — multimodal generation (text plus
//!   inline image or audio data)
//! * [`GeminiClient::generate_text`] — same, returning the first candidate's
//!   text or [`MultiscribeError::EmptyResponse`]
//! * [`GeminiClient::list_models`] — enumerate models, following pagination
//!
//! Media travels as base64 `inlineData` inside the request body, so a call is
//! one round-trip with no separate upload step.

use crate::ai::models::{
    ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse, ListModelsResponse,
    ModelInfo, Part,
};
use crate::envfile::require_key;
use crate::error::{MultiscribeError, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable holding the Gemini API key.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const SERVICE: &str = "Gemini";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client with the given key and per-request timeout.
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Build a client reading `GOOGLE_API_KEY` from the environment.
    pub fn from_env(timeout_secs: u64) -> Result<Self> {
        let key = require_key(
            GOOGLE_API_KEY_VAR,
            "Needed for Gemini reinterpretation, transcription, and model listing.",
        )?;
        Self::new(key, timeout_secs)
    }

    /// Point the client at a different base URL (tests).
    #[doc(hidden)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Call `models/<model>:generateContent` with a single user turn.
    pub async fn generate_content(
        &self,
        model: &str,
        parts: Vec<Part>,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let body = GenerateContentRequest::single_turn(parts);

        debug!("Gemini generateContent: model={}", model);
        let response = self.http.post(&url).json(&body).send().await?;
        let response = check_status(response).await?;

        let parsed: GenerateContentResponse = response.json().await?;
        if let Some(usage) = parsed.usage_metadata {
            debug!(
                "Gemini usage: {} prompt tokens, {} candidate tokens",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }
        Ok(parsed)
    }

    /// Like [`generate_content`](Self::generate_content), but unwrap the first
    /// candidate's text.
    pub async fn generate_text(&self, model: &str, parts: Vec<Part>) -> Result<String> {
        let response = self.generate_content(model, parts).await?;
        response
            .text()
            .ok_or(MultiscribeError::EmptyResponse { service: SERVICE })
    }

    /// List all models, following `nextPageToken` pagination.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!("{}/models?key={}", self.base_url, self.api_key);
            if let Some(ref token) = page_token {
                url.push_str(&format!("&pageToken={}", token));
            }

            let response = self.http.get(&url).send().await?;
            let response = check_status(response).await?;
            let page: ListModelsResponse = response.json().await?;

            models.extend(page.models);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        info!("Gemini reports {} models", models.len());
        Ok(models)
    }
}

/// Map a non-success response to [`MultiscribeError::ApiError`], pulling the
/// message out of the standard error envelope when the body carries one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|env| env.error.message)
        .unwrap_or_else(|_| truncate(&body, 200));

    Err(MultiscribeError::ApiError {
        service: SERVICE,
        status: status.as_u16(),
        message,
    })
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}…")
    }
}
