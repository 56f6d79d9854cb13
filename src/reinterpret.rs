//! OCR-style reinterpretation of extracted pages.
//!
//! Operates on the nested extraction layout: a page directory holds the
//! rendered page PNG next to one text file per extraction strategy. For each
//! text file, the page image and that machine extraction are sent to Gemini,
//! which re-reads the page as a human would and returns Markdown; the result
//! lands beside the source as `<stem>.md`.
//!
//! The machine extraction rides along in the prompt deliberately: the model
//! resolves glyphs the rasterised image renders poorly, while the image
//! supplies layout and reading order that the text extraction lost.

use crate::ai::gemini::GeminiClient;
use crate::ai::models::Part;
use crate::config::ReinterpretConfig;
use crate::error::{MultiscribeError, Result};
use crate::postprocess::clean_markdown;
use crate::prompts::{reinterpret_prompt, DEFAULT_REINTERPRET_PROMPT};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Find the page image in a page directory: the first `.png`, by name.
pub fn find_page_image(dir: &Path) -> Result<PathBuf> {
    let mut pngs: Vec<PathBuf> = list_files_with_extension(dir, "png")?;
    pngs.sort();
    pngs.into_iter()
        .next()
        .ok_or_else(|| MultiscribeError::NoPageImage {
            dir: dir.to_path_buf(),
        })
}

/// The numeric page subdirectories of a nested extraction root, in ascending
/// page order.
pub fn page_dirs(root: &Path) -> Result<Vec<(usize, PathBuf)>> {
    let entries = std::fs::read_dir(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MultiscribeError::FileNotFound {
            path: root.to_path_buf(),
        },
        _ => MultiscribeError::Internal(format!("Failed to read '{}': {e}", root.display())),
    })?;

    let mut dirs: Vec<(usize, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .parse::<usize>()
                .ok()
                .map(|page| (page, entry.path()))
        })
        .collect();

    dirs.sort_by_key(|(page, _)| *page);
    Ok(dirs)
}

/// Reinterpret every text section in one page directory.
///
/// Returns the Markdown files written. A directory with an image but no text
/// sections produces no output and a warning — not an error, since rendering
/// without text extraction is a legitimate intermediate state.
pub async fn reinterpret_dir(
    client: &GeminiClient,
    dir: &Path,
    config: &ReinterpretConfig,
) -> Result<Vec<PathBuf>> {
    let image_path = find_page_image(dir)?;
    let image_bytes = tokio::fs::read(&image_path)
        .await
        .map_err(|e| MultiscribeError::Internal(format!("Failed to read page image: {e}")))?;
    let image_b64 = STANDARD.encode(&image_bytes);

    let mut txt_files = list_files_with_extension(dir, "txt")?;
    txt_files.sort();

    if txt_files.is_empty() {
        warn!("No text sections to reinterpret in {}", dir.display());
        return Ok(Vec::new());
    }

    let base_prompt = config
        .prompt
        .as_deref()
        .unwrap_or(DEFAULT_REINTERPRET_PROMPT);

    let mut written = Vec::with_capacity(txt_files.len());
    for txt_path in txt_files {
        let prior = tokio::fs::read_to_string(&txt_path)
            .await
            .map_err(|e| MultiscribeError::Internal(format!("Failed to read section: {e}")))?;

        let parts = vec![
            Part::text(reinterpret_prompt(base_prompt, &prior)),
            Part::inline_data("image/png", image_b64.clone()),
        ];

        let markdown = client.generate_text(&config.model, parts).await?;
        let markdown = clean_markdown(&markdown);

        let md_path = txt_path.with_extension("md");
        tokio::fs::write(&md_path, &markdown)
            .await
            .map_err(|e| MultiscribeError::OutputWriteFailed {
                path: md_path.clone(),
                source: e,
            })?;

        info!(
            "Processed: {}",
            txt_path.file_name().unwrap_or_default().to_string_lossy()
        );
        written.push(md_path);
    }

    Ok(written)
}

/// Reinterpret every page directory under a nested extraction root, in page
/// order. Returns the Markdown files written across all pages.
pub async fn reinterpret_tree(
    client: &GeminiClient,
    root: &Path,
    config: &ReinterpretConfig,
) -> Result<Vec<PathBuf>> {
    let dirs = page_dirs(root)?;
    if dirs.is_empty() {
        return Err(MultiscribeError::InvalidConfig(format!(
            "'{}' contains no numeric page directories — expected a nested extraction root",
            root.display()
        )));
    }

    let mut written = Vec::new();
    for (page, dir) in dirs {
        info!("Reinterpreting page {}", page);
        written.extend(reinterpret_dir(client, &dir, config).await?);
    }
    Ok(written)
}

fn list_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MultiscribeError::FileNotFound {
            path: dir.to_path_buf(),
        },
        _ => MultiscribeError::Internal(format!("Failed to read '{}': {e}", dir.display())),
    })?;

    Ok(entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_page_image_picks_first_png_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("section_0_ZLast.png"), b"png").unwrap();
        std::fs::write(dir.path().join("section_0_PageImage.png"), b"png").unwrap();
        std::fs::write(dir.path().join("section_0_PdfExtract.txt"), "text").unwrap();

        let image = find_page_image(dir.path()).unwrap();
        assert_eq!(
            image.file_name().unwrap().to_str().unwrap(),
            "section_0_PageImage.png"
        );
    }

    #[test]
    fn find_page_image_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("only.txt"), "text").unwrap();

        let err = find_page_image(dir.path()).unwrap_err();
        assert!(matches!(err, MultiscribeError::NoPageImage { .. }));
    }

    #[test]
    fn page_dirs_sorted_numerically() {
        let root = tempfile::tempdir().unwrap();
        // String sort would order these 0, 10, 2 — page order must win.
        for page in ["10", "2", "0"] {
            std::fs::create_dir(root.path().join(page)).unwrap();
        }
        std::fs::create_dir(root.path().join("not-a-page")).unwrap();
        std::fs::write(root.path().join("5"), b"a file, not a dir").unwrap();

        let dirs = page_dirs(root.path()).unwrap();
        let pages: Vec<usize> = dirs.iter().map(|(p, _)| *p).collect();
        assert_eq!(pages, vec![0, 2, 10]);
    }

    #[test]
    fn list_files_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(dir.path().join("b.TXT"), "b").unwrap();
        std::fs::write(dir.path().join("c.md"), "c").unwrap();

        let files = list_files_with_extension(dir.path(), "txt").unwrap();
        assert_eq!(files.len(), 2);
    }
}
