//! Generative-AI service clients.
//!
//! Two fixed REST services, each behind its own thin client:
//!
//! * [`gemini`] — Google `generateContent` (vision reinterpretation, audio
//!   transcription, model listing)
//! * [`openai`] — OpenAI audio transcription (whisper)
//!
//! Both clients are single-shot: one HTTP request per operation, a
//! configurable timeout, and no retry or backoff. Failures map onto
//! [`crate::error::MultiscribeError`] with the HTTP status and the service's
//! own error message preserved.

pub mod gemini;
pub mod models;
pub mod openai;

pub use gemini::{GeminiClient, GOOGLE_API_KEY_VAR};
pub use openai::{OpenAiClient, OPENAI_API_KEY_VAR};
