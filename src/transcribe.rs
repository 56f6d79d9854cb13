//! Audio transcription through the generative-AI services.
//!
//! Two routes to the same result: Gemini receives the audio as inline data
//! with a language-aware instruction, while the OpenAI route uses the
//! dedicated transcription endpoint. Both validate the input first and report
//! wall-clock elapsed time alongside the text.

use crate::ai::gemini::GeminiClient;
use crate::ai::models::Part;
use crate::ai::openai::{OpenAiClient, DEFAULT_WHISPER_MODEL};
use crate::config::{TranscribeConfig, TranscribeService};
use crate::error::{MultiscribeError, Result};
use crate::input::{resolve_audio, AudioInput};
use crate::prompts::transcription_prompt;
use crate::timing::{time_async, Timed};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::info;

/// Default Gemini model for audio transcription.
pub const DEFAULT_GEMINI_AUDIO_MODEL: &str = "gemini-1.5-pro-latest";

/// A completed transcription.
#[derive(Debug, Clone)]
pub struct Transcription {
    pub text: String,
    pub service: TranscribeService,
    pub model: String,
}

/// Transcribe an audio file with the configured service, reading the API key
/// from the environment.
pub async fn transcribe(path: &Path, config: &TranscribeConfig) -> Result<Timed<Transcription>> {
    let audio = resolve_audio(path)?;

    match config.service {
        TranscribeService::Gemini => {
            let client = GeminiClient::from_env(config.api_timeout_secs)?;
            transcribe_gemini(&client, &audio, config).await
        }
        TranscribeService::Whisper => {
            let client = OpenAiClient::from_env(config.api_timeout_secs)?;
            transcribe_whisper(&client, &audio, config).await
        }
    }
}

/// Transcribe through Gemini `generateContent` with the audio inline.
pub async fn transcribe_gemini(
    client: &GeminiClient,
    audio: &AudioInput,
    config: &TranscribeConfig,
) -> Result<Timed<Transcription>> {
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_GEMINI_AUDIO_MODEL.to_string());

    let bytes = tokio::fs::read(&audio.path)
        .await
        .map_err(|e| MultiscribeError::Internal(format!("Failed to read audio file: {e}")))?;
    info!(
        "Transcribing {} ({} bytes) with Gemini model {}",
        audio.path.display(),
        bytes.len(),
        model
    );

    let parts = vec![
        Part::text(transcription_prompt(config.language.as_deref())),
        Part::inline_data(audio.mime_type, STANDARD.encode(&bytes)),
    ];

    let timed = time_async(client.generate_text(&model, parts)).await;
    let text = timed.value?;

    Ok(Timed {
        value: Transcription {
            text,
            service: TranscribeService::Gemini,
            model,
        },
        elapsed: timed.elapsed,
    })
}

/// Transcribe through the OpenAI audio-transcription endpoint.
pub async fn transcribe_whisper(
    client: &OpenAiClient,
    audio: &AudioInput,
    config: &TranscribeConfig,
) -> Result<Timed<Transcription>> {
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_WHISPER_MODEL.to_string());

    info!(
        "Transcribing {} with OpenAI model {}",
        audio.path.display(),
        model
    );

    let timed = time_async(client.transcribe(audio, &model, config.language.as_deref())).await;
    let text = timed.value?;

    Ok(Timed {
        value: Transcription {
            text,
            service: TranscribeService::Whisper,
            model,
        },
        elapsed: timed.elapsed,
    })
}
