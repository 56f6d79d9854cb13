//! Extraction strategy backed by the `pdf-extract` crate.
//!
//! `pdf-extract` walks the whole document in one call and emits a form feed
//! (`\x0C`) between pages, so per-page sections come from splitting its
//! output on that separator. The library's own text layout is preserved
//! untouched.

use super::{ExtractorKind, TextExtractor};
use crate::error::{MultiscribeError, Result};
use crate::output::Section;
use std::path::Path;
use tracing::warn;

pub struct PdfExtractBackend;

impl TextExtractor for PdfExtractBackend {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::PdfExtract
    }

    fn extract(&self, path: &Path) -> Result<Vec<Section>> {
        let text =
            pdf_extract::extract_text(path).map_err(|e| MultiscribeError::ExtractionFailed {
                backend: ExtractorKind::PdfExtract.name(),
                detail: e.to_string(),
            })?;

        if text.trim().is_empty() {
            warn!(
                "PDF appears to be scanned or has no extractable text: {}",
                path.display()
            );
        }

        Ok(split_pages(&text))
    }
}

/// Split full-document text into per-page sections on the form-feed
/// separator `pdf-extract` emits between pages.
///
/// A trailing separator after the last page is part of the delimiter, not an
/// extra empty page — section count must equal page count.
pub(crate) fn split_pages(text: &str) -> Vec<Section> {
    let text = text.trim_end();
    let text = text.strip_suffix('\x0C').unwrap_or(text);
    text.split('\x0C')
        .enumerate()
        .map(|(index, body)| Section {
            index,
            body: body.to_string(),
        })
        .collect()
}
