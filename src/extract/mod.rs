//! Text extraction strategies.
//!
//! Two interchangeable backends implement the same contract — given a PDF
//! path, produce one text [`Section`] per page, in page order — each backed
//! by a different PDF library with its own ideas about text layout. The
//! strategy set is a closed enum, so an impossible backend name cannot reach
//! the library: [`ExtractorKind::from_name`] is the only place strings are
//! interpreted, and it is meant for the CLI boundary where unknown names are
//! reported and skipped rather than treated as errors.

mod lopdf_backend;
mod pdf_extract_backend;

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::input::resolve_pdf;
use crate::output::{basename_of, ExtractionResult, OutputWriter, Section};
use crate::render::render_all_pages;
use crate::timing::time_call;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

pub use lopdf_backend::LopdfBackend;
pub use pdf_extract_backend::PdfExtractBackend;

/// A text extraction strategy: one page of text per PDF page, in page order.
pub trait TextExtractor {
    /// Which strategy this is.
    fn kind(&self) -> ExtractorKind;

    /// Extract one [`Section`] per page. The input path has already been
    /// validated as a readable PDF.
    fn extract(&self, path: &Path) -> Result<Vec<Section>>;
}

/// The closed set of available extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractorKind {
    /// The `pdf-extract` crate: full-document extraction, pages split on the
    /// form-feed separator it emits between pages.
    PdfExtract,
    /// The `lopdf` crate: page-by-page extraction over the document's page tree.
    Lopdf,
}

impl ExtractorKind {
    /// Every known strategy, in default execution order.
    pub fn all() -> &'static [ExtractorKind] {
        &[ExtractorKind::PdfExtract, ExtractorKind::Lopdf]
    }

    /// Canonical CLI name.
    pub fn name(self) -> &'static str {
        match self {
            ExtractorKind::PdfExtract => "pdf-extract",
            ExtractorKind::Lopdf => "lopdf",
        }
    }

    /// CamelCase label used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            ExtractorKind::PdfExtract => "PdfExtract",
            ExtractorKind::Lopdf => "Lopdf",
        }
    }

    /// Parse a user-supplied name. Case-insensitive; `-` and `_` are
    /// interchangeable. Returns None for anything unrecognised.
    pub fn from_name(name: &str) -> Option<ExtractorKind> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pdf-extract" | "pdfextract" => Some(ExtractorKind::PdfExtract),
            "lopdf" => Some(ExtractorKind::Lopdf),
            _ => None,
        }
    }

    fn backend(self) -> Box<dyn TextExtractor> {
        match self {
            ExtractorKind::PdfExtract => Box::new(PdfExtractBackend),
            ExtractorKind::Lopdf => Box::new(LopdfBackend),
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse an `--extractors` value into strategies plus the unknown names.
///
/// `"all"` (case-insensitive) selects every strategy. Otherwise the value is
/// a comma-separated list; recognised names are returned deduplicated in
/// request order, unrecognised ones verbatim for the caller to report.
pub fn parse_extractor_names(names: &str) -> (Vec<ExtractorKind>, Vec<String>) {
    if names.trim().eq_ignore_ascii_case("all") {
        return (ExtractorKind::all().to_vec(), Vec::new());
    }

    let mut kinds = Vec::new();
    let mut unknown = Vec::new();
    for name in names.split(',') {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        match ExtractorKind::from_name(name) {
            Some(kind) if !kinds.contains(&kind) => kinds.push(kind),
            Some(_) => {}
            None => unknown.push(name.to_string()),
        }
    }
    (kinds, unknown)
}

/// Run one strategy against a PDF, timing the extraction.
pub fn run_extractor(kind: ExtractorKind, path: &Path) -> Result<ExtractionResult> {
    let path = resolve_pdf(path)?;
    let backend = kind.backend();

    let timed = time_call(|| backend.extract(&path));
    let sections = timed.value?;

    info!(
        "Extractor '{}': {} sections in {:.2}s",
        kind,
        sections.len(),
        timed.elapsed.as_secs_f64()
    );

    Ok(ExtractionResult {
        backend: kind,
        sections,
        elapsed: timed.elapsed,
    })
}

/// Everything one extraction run produced.
#[derive(Debug)]
pub struct DocumentExtraction {
    /// Output basename derived from the input file stem.
    pub basename: String,
    /// One result per strategy, in the order they ran.
    pub results: Vec<ExtractionResult>,
    /// Every file written, text sections and page images alike.
    pub written: Vec<PathBuf>,
}

/// Run the configured strategies over a PDF and write all output.
///
/// This is the library-level counterpart of the `extract` CLI command: each
/// strategy runs in turn, its sections are written in the configured layout,
/// and — when enabled — every page is rasterised into a PNG section.
pub async fn extract_document(
    path: &Path,
    config: &ExtractionConfig,
) -> Result<DocumentExtraction> {
    let path = resolve_pdf(path)?;
    let basename = basename_of(&path);
    let writer = OutputWriter::new(&config.output_dir, config.layout);

    let mut results = Vec::with_capacity(config.extractors.len());
    let mut written = Vec::new();

    for &kind in &config.extractors {
        let result = run_extractor(kind, &path)?;
        written.extend(writer.write_result(&basename, &result)?);
        results.push(result);
    }

    if config.render_pages {
        let rendered = render_all_pages(&path, config.max_rendered_pixels).await?;
        for (idx, image) in &rendered {
            written.push(writer.write_page_image(&basename, *idx, image)?);
        }
    }

    info!(
        "Extraction complete: {} strategies, {} files written",
        results.len(),
        written.len()
    );

    Ok(DocumentExtraction {
        basename,
        results,
        written,
    })
}
