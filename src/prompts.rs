//! Prompts sent to the generative-AI endpoints.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing how pages are reinterpreted or
//!    audio is transcribed means editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the assembled prompts without
//!    calling a real API.
//!
//! Callers can override the reinterpretation prompt via
//! [`crate::config::ReinterpretConfig::prompt`]; the constants here apply
//! when no override is provided.

/// Default prompt for reinterpreting a rasterised PDF page.
///
/// The model receives this text together with the page image; the prior
/// machine extraction is appended by [`reinterpret_prompt`].
pub const DEFAULT_REINTERPRET_PROMPT: &str = "\
The attached image is a rasterised page of a PDF document. Read it as a \
human would: understand the page layout and reading order, then reproduce \
the page content as clean, well-structured Markdown. Preserve headings, \
lists, and tables. Output ONLY the Markdown — no commentary, no code fences. \
A machine text extraction of the same page is provided below; use it to \
resolve characters that are hard to read in the image, but trust the image \
for layout and reading order.";

/// Assemble the full reinterpretation prompt, embedding the prior
/// machine-extraction text for the page.
pub fn reinterpret_prompt(base: &str, prior_extraction: &str) -> String {
    format!(
        "{}\n\nMachine extraction result:\n\"\"\"\n{}\n\"\"\"",
        base, prior_extraction
    )
}

/// Build the Gemini transcription instruction, optionally naming the spoken
/// language so the model neither translates nor guesses.
pub fn transcription_prompt(language: Option<&str>) -> String {
    match language {
        Some(lang) => format!(
            "Transcribe this audio file. The spoken language is '{lang}'; \
             output the transcription in the same language. Output ONLY the \
             transcription text.",
        ),
        None => "Transcribe this audio file in its original language. \
                 Output ONLY the transcription text."
            .to_string(),
    }
}
