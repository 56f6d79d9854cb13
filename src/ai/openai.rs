//! Client for the OpenAI audio-transcription endpoint.
//!
//! One operation: POST the audio file as multipart form data to
//! `/v1/audio/transcriptions` and read back the transcription text.
//! Single-shot, bearer-authenticated, configurable timeout.

use crate::ai::models::TranscriptionResponse;
use crate::envfile::require_key;
use crate::error::{MultiscribeError, Result};
use crate::input::AudioInput;
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

const BASE_URL: &str = "https://api.openai.com/v1";
const SERVICE: &str = "OpenAI";

/// Default transcription model.
pub const DEFAULT_WHISPER_MODEL: &str = "whisper-1";

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
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

    /// Build a client reading `OPENAI_API_KEY` from the environment.
    pub fn from_env(timeout_secs: u64) -> Result<Self> {
        let key = require_key(OPENAI_API_KEY_VAR, "Needed for whisper transcription.")?;
        Self::new(key, timeout_secs)
    }

    /// Point the client at a different base URL (tests).
    #[doc(hidden)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Transcribe an audio file, returning the plain transcription text.
    pub async fn transcribe(
        &self,
        audio: &AudioInput,
        model: &str,
        language: Option<&str>,
    ) -> Result<String> {
        let bytes = tokio::fs::read(&audio.path)
            .await
            .map_err(|e| MultiscribeError::Internal(format!("Failed to read audio file: {e}")))?;

        let file_name = audio
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        debug!(
            "OpenAI transcription: model={}, file={} ({} bytes)",
            model,
            file_name,
            bytes.len()
        );

        let file_part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(audio.mime_type)?;

        let mut form = reqwest::multipart::Form::new()
            .text("model", model.to_string())
            .part("file", file_part);
        if let Some(lang) = language {
            form = form.text("language", lang.to_string());
        }

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MultiscribeError::ApiError {
                service: SERVICE,
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let parsed: TranscriptionResponse = response.json().await?;
        if parsed.text.is_empty() {
            return Err(MultiscribeError::EmptyResponse { service: SERVICE });
        }
        Ok(parsed.text)
    }
}
