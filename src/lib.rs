//! # multiscribe
//!
//! Extract text and images from PDF files with interchangeable backends, then
//! hand the extracted content to generative-AI APIs for OCR-style
//! reinterpretation or audio transcription.
//!
//! ## Why this crate?
//!
//! No single PDF text extractor gets every document right — each library has
//! its own ideas about reading order, whitespace, and ligatures. Running the
//! same document through several backends and comparing the timed results
//! shows which one holds up. And when none of them do (scanned pages,
//! complex layouts), the rendered page image plus the best machine
//! extraction can be handed to a vision model that reads the page as a human
//! would.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Extract      per-page text via pdf-extract and/or lopdf, timed
//!  ├─ 2. Render       rasterise pages via pdfium (optional, spawn_blocking)
//!  ├─ 3. Write        flat files or per-page section directories
//!  ├─ 4. Reinterpret  page PNG + machine text → Gemini → Markdown
//!  └─ 5. Polish       deterministic Markdown cleanup
//!
//! Audio
//!  └─ Transcribe      Gemini inline-data or OpenAI whisper endpoint, timed
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use multiscribe::{extract_document, ExtractionConfig, OutputLayout};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::builder()
//!         .output_dir("out")
//!         .layout(OutputLayout::Nested)
//!         .render_pages(true)
//!         .build()?;
//!     let extraction = extract_document("document.pdf".as_ref(), &config).await?;
//!     for result in &extraction.results {
//!         eprintln!("{}: {} sections in {:.2}s",
//!             result.backend, result.sections.len(), result.elapsed_secs());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `multiscribe` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! multiscribe = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod ai;
pub mod config;
pub mod envfile;
pub mod error;
pub mod extract;
pub mod input;
pub mod output;
pub mod postprocess;
pub mod prompts;
pub mod reinterpret;
pub mod render;
pub mod timing;
pub mod transcribe;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use ai::{GeminiClient, OpenAiClient, GOOGLE_API_KEY_VAR, OPENAI_API_KEY_VAR};
pub use config::{
    ExtractionConfig, ExtractionConfigBuilder, OutputLayout, ReinterpretConfig, TranscribeConfig,
    TranscribeService,
};
pub use error::MultiscribeError;
pub use extract::{
    extract_document, parse_extractor_names, run_extractor, DocumentExtraction, ExtractorKind,
    TextExtractor,
};
pub use output::{ExtractionResult, OutputWriter, Section};
pub use reinterpret::{reinterpret_dir, reinterpret_tree};
pub use timing::Timed;
pub use transcribe::{transcribe, Transcription};
