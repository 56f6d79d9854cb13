//! Configuration types for extraction, reinterpretation, and transcription.
//!
//! Extraction behaviour is controlled through [`ExtractionConfig`], built via
//! its [`ExtractionConfigBuilder`] so callers set only what they care about
//! and rely on validated defaults for the rest. The two API-facing configs
//! are plain structs with `Default` impls — they have too few knobs to earn a
//! builder.

use crate::error::MultiscribeError;
use crate::extract::ExtractorKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How extracted sections are laid out on disk.
///
/// | Layout | Files |
/// |--------|-------|
/// | Flat   | `<out>/<basename>_<Label>.txt` — one file per strategy |
/// | Nested | `<out>/<basename>/<page>/section_<page>_<Label>.txt` — one subdirectory per page |
///
/// The nested layout is the one the reinterpretation flow consumes: each page
/// directory holds the page image next to every strategy's text for that page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputLayout {
    /// One text file per strategy, all pages joined. (default)
    #[default]
    Flat,
    /// One subdirectory per page, one section file per strategy per page.
    Nested,
}

/// Configuration for a PDF extraction run.
///
/// # Example
/// ```rust
/// use multiscribe::{ExtractionConfig, ExtractorKind, OutputLayout};
///
/// let config = ExtractionConfig::builder()
///     .extractors(vec![ExtractorKind::PdfExtract])
///     .output_dir("out")
///     .layout(OutputLayout::Nested)
///     .render_pages(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Strategies to run, in order. Default: all known strategies.
    pub extractors: Vec<ExtractorKind>,

    /// Directory receiving the output files. Default: current directory.
    pub output_dir: PathBuf,

    /// Flat or nested output naming. Default: [`OutputLayout::Flat`].
    pub layout: OutputLayout,

    /// Also rasterise each page to a PNG section. Requires the nested layout.
    /// Default: false.
    pub render_pages: bool,

    /// Maximum rendered image dimension (width or height) in pixels. Default: 2000.
    ///
    /// A safety cap independent of page size: pdfium scales the other
    /// dimension proportionally, so a render never allocates more than
    /// roughly `max_rendered_pixels²` bytes of pixels.
    pub max_rendered_pixels: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extractors: ExtractorKind::all().to_vec(),
            output_dir: PathBuf::from("."),
            layout: OutputLayout::default(),
            render_pages: false,
            max_rendered_pixels: 2000,
        }
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn extractors(mut self, kinds: Vec<ExtractorKind>) -> Self {
        self.config.extractors = kinds;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn layout(mut self, layout: OutputLayout) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn render_pages(mut self, v: bool) -> Self {
        self.config.render_pages = v;
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.max(100);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, MultiscribeError> {
        let c = &self.config;
        if c.render_pages && c.layout != OutputLayout::Nested {
            return Err(MultiscribeError::InvalidConfig(
                "Page rendering requires the nested output layout (--layout nested)".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Configuration for OCR-style reinterpretation of extracted pages.
#[derive(Debug, Clone)]
pub struct ReinterpretConfig {
    /// Gemini model ID. Default: "gemini-1.5-pro-latest".
    pub model: String,

    /// Custom reinterpretation prompt. The prior extraction text is appended.
    /// If None, uses the built-in default.
    pub prompt: Option<String>,

    /// Per-API-call timeout in seconds. Default: 120.
    pub api_timeout_secs: u64,
}

impl Default for ReinterpretConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro-latest".to_string(),
            prompt: None,
            api_timeout_secs: 120,
        }
    }
}

/// Which transcription service to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TranscribeService {
    /// Gemini `generateContent` with the audio as inline data. (default)
    #[default]
    Gemini,
    /// OpenAI audio-transcription endpoint (whisper-1).
    Whisper,
}

/// Configuration for audio transcription.
#[derive(Debug, Clone)]
pub struct TranscribeConfig {
    /// Service to use. Default: [`TranscribeService::Gemini`].
    pub service: TranscribeService,

    /// Model ID. If None, the service default applies
    /// ("gemini-1.5-pro-latest" / "whisper-1").
    pub model: Option<String>,

    /// Spoken-language hint, ISO-639-1 (e.g. "ja", "en"). Optional.
    pub language: Option<String>,

    /// Per-API-call timeout in seconds. Default: 300 — audio uploads are
    /// large and transcription is slow compared to text generation.
    pub api_timeout_secs: u64,
}

impl Default for TranscribeConfig {
    fn default() -> Self {
        Self {
            service: TranscribeService::default(),
            model: None,
            language: None,
            api_timeout_secs: 300,
        }
    }
}
