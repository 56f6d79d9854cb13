//! Extraction results and on-disk output layout.
//!
//! A [`Section`] is one page's worth of extracted content; an
//! [`ExtractionResult`] is the ordered sections of one strategy run plus the
//! wall-clock time it took. [`OutputWriter`] maps results onto the two
//! documented naming schemes:
//!
//! ```text
//! flat:    <out>/<basename>_<Label>.txt
//! nested:  <out>/<basename>/<page>/section_<page>_<Label>.txt
//!                                  section_<page>_PageImage.png
//! ```
//!
//! Writes always overwrite, so re-running extraction on the same input is
//! idempotent: identical content, identical paths.

use crate::config::OutputLayout;
use crate::error::MultiscribeError;
use crate::extract::ExtractorKind;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// One page's worth of extracted text. Ordered by page; identity is position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// 0-based page index.
    pub index: usize,
    /// The page text as the backend produced it — no whitespace normalisation.
    pub body: String,
}

/// The ordered sections produced by one extraction strategy, plus timing.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub backend: ExtractorKind,
    pub sections: Vec<Section>,
    pub elapsed: Duration,
}

impl ExtractionResult {
    /// All sections joined into one document, in page order.
    pub fn joined(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.body.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// The first `n` characters of the joined text, for console echo.
    pub fn preview(&self, n: usize) -> String {
        self.joined().chars().take(n).collect()
    }

    /// Elapsed time in seconds, for `{:.2}`-style display.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Writes extraction output according to the configured layout.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
    layout: OutputLayout,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>, layout: OutputLayout) -> Self {
        Self {
            output_dir: output_dir.into(),
            layout,
        }
    }

    /// Write one strategy's result, returning the paths written.
    pub fn write_result(
        &self,
        basename: &str,
        result: &ExtractionResult,
    ) -> Result<Vec<PathBuf>, MultiscribeError> {
        match self.layout {
            OutputLayout::Flat => {
                let path = self.flat_text_path(basename, result.backend);
                write_file(&path, result.joined().as_bytes())?;
                Ok(vec![path])
            }
            OutputLayout::Nested => {
                let mut written = Vec::with_capacity(result.sections.len());
                for section in &result.sections {
                    let path = self.nested_section_path(
                        basename,
                        section.index,
                        result.backend.label(),
                        "txt",
                    );
                    write_file(&path, section.body.as_bytes())?;
                    written.push(path);
                }
                Ok(written)
            }
        }
    }

    /// Write a rasterised page as a PNG section (nested layout only).
    pub fn write_page_image(
        &self,
        basename: &str,
        page_idx: usize,
        image: &DynamicImage,
    ) -> Result<PathBuf, MultiscribeError> {
        if self.layout != OutputLayout::Nested {
            return Err(MultiscribeError::InvalidConfig(
                "Page images are only written in the nested layout".into(),
            ));
        }

        let path = self.nested_section_path(basename, page_idx, "PageImage", "png");
        ensure_parent(&path)?;
        image
            .save(&path)
            .map_err(|e| MultiscribeError::OutputWriteFailed {
                path: path.clone(),
                source: std::io::Error::other(e.to_string()),
            })?;
        debug!("Wrote page image: {}", path.display());
        Ok(path)
    }

    /// `<out>/<basename>_<Label>.txt`
    fn flat_text_path(&self, basename: &str, backend: ExtractorKind) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.txt", basename, backend.label()))
    }

    /// `<out>/<basename>/<page>/section_<page>_<Label>.<ext>`
    fn nested_section_path(
        &self,
        basename: &str,
        page_idx: usize,
        label: &str,
        ext: &str,
    ) -> PathBuf {
        self.output_dir
            .join(basename)
            .join(page_idx.to_string())
            .join(format!("section_{}_{}.{}", page_idx, label, ext))
    }
}

/// The file stem of an input path, used as the output basename.
pub fn basename_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

fn ensure_parent(path: &Path) -> Result<(), MultiscribeError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MultiscribeError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), MultiscribeError> {
    ensure_parent(path)?;
    std::fs::write(path, bytes).map_err(|e| MultiscribeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_pages(pages: &[&str]) -> ExtractionResult {
        ExtractionResult {
            backend: ExtractorKind::PdfExtract,
            sections: pages
                .iter()
                .enumerate()
                .map(|(index, body)| Section {
                    index,
                    body: body.to_string(),
                })
                .collect(),
            elapsed: Duration::from_millis(120),
        }
    }

    #[test]
    fn joined_preserves_page_order() {
        let result = result_with_pages(&["first", "second", "third"]);
        assert_eq!(result.joined(), "first\n\nsecond\n\nthird");
    }

    #[test]
    fn preview_is_char_boundary_safe() {
        let result = result_with_pages(&["日本語のテキスト"]);
        assert_eq!(result.preview(3), "日本語");
    }

    #[test]
    fn flat_layout_writes_one_file_per_strategy() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputLayout::Flat);
        let result = result_with_pages(&["page one", "page two"]);

        let written = writer.write_result("report", &result).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0], dir.path().join("report_PdfExtract.txt"));
        assert_eq!(
            std::fs::read_to_string(&written[0]).unwrap(),
            "page one\n\npage two"
        );
    }

    #[test]
    fn nested_layout_writes_per_page_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputLayout::Nested);
        let result = result_with_pages(&["a", "b", "c"]);

        let written = writer.write_result("report", &result).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(
            written[1],
            dir.path()
                .join("report")
                .join("1")
                .join("section_1_PdfExtract.txt")
        );
        assert_eq!(std::fs::read_to_string(&written[2]).unwrap(), "c");
    }

    #[test]
    fn rerun_overwrites_with_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputLayout::Flat);
        let result = result_with_pages(&["stable"]);

        let first = writer.write_result("doc", &result).unwrap();
        let second = writer.write_result("doc", &result).unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&first[0]).unwrap(), "stable");
    }

    #[test]
    fn page_image_rejected_in_flat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputLayout::Flat);
        let img = DynamicImage::new_rgba8(4, 4);

        let err = writer.write_page_image("doc", 0, &img).unwrap_err();
        assert!(matches!(err, MultiscribeError::InvalidConfig(_)));
    }

    #[test]
    fn page_image_lands_in_page_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputLayout::Nested);
        let img = DynamicImage::new_rgba8(4, 4);

        let path = writer.write_page_image("doc", 2, &img).unwrap();
        assert_eq!(
            path,
            dir.path()
                .join("doc")
                .join("2")
                .join("section_2_PageImage.png")
        );
        assert!(path.exists());
    }

    #[test]
    fn basename_strips_extension() {
        assert_eq!(basename_of(Path::new("/tmp/report.pdf")), "report");
        assert_eq!(basename_of(Path::new("archive.tar.pdf")), "archive.tar");
    }
}
