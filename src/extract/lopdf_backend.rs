//! Extraction strategy backed by the `lopdf` crate.
//!
//! `lopdf` exposes the page tree directly, so this backend asks for each
//! page's text individually — the page order comes from `get_pages()`, which
//! iterates the tree in document order.

use super::{ExtractorKind, TextExtractor};
use crate::error::{MultiscribeError, Result};
use crate::output::Section;
use lopdf::Document;
use std::path::Path;
use tracing::warn;

pub struct LopdfBackend;

impl TextExtractor for LopdfBackend {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Lopdf
    }

    fn extract(&self, path: &Path) -> Result<Vec<Section>> {
        let doc = Document::load(path).map_err(|e| MultiscribeError::CorruptPdf {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        if doc.is_encrypted() {
            return Err(MultiscribeError::PasswordRequired {
                path: path.to_path_buf(),
            });
        }

        let pages = doc.get_pages();
        let mut sections = Vec::with_capacity(pages.len());

        for (index, (&page_num, _)) in pages.iter().enumerate() {
            let body = doc.extract_text(&[page_num]).map_err(|e| {
                MultiscribeError::ExtractionFailed {
                    backend: ExtractorKind::Lopdf.name(),
                    detail: format!("page {}: {}", page_num, e),
                }
            })?;
            sections.push(Section { index, body });
        }

        if sections.iter().all(|s| s.body.trim().is_empty()) {
            warn!(
                "PDF appears to be scanned or has no extractable text: {}",
                path.display()
            );
        }

        Ok(sections)
    }
}
