//! PDF rasterisation: render pages to `DynamicImage` via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async contexts.
//! `tokio::task::spawn_blocking` moves the work onto a dedicated thread pool
//! thread designed for blocking operations, preventing the Tokio worker
//! threads from stalling during CPU-heavy rendering.
//!
//! ## Why cap pixels?
//!
//! Page sizes vary wildly: an A0 poster rendered at print resolution would
//! produce a tens-of-thousands-of-pixels image. The cap bounds the longest
//! edge regardless of physical page size, keeping memory predictable and
//! matching the image-size sweet spot for vision models.

use crate::error::MultiscribeError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Rasterise every page of a PDF into images.
///
/// Runs inside `spawn_blocking` since pdfium operations are CPU-bound.
///
/// # Returns
/// A vector of `(page_index_0based, DynamicImage)` tuples, in page order.
pub async fn render_all_pages(
    pdf_path: &Path,
    max_pixels: u32,
) -> Result<Vec<(usize, DynamicImage)>, MultiscribeError> {
    let path = pdf_path.to_path_buf();

    tokio::task::spawn_blocking(move || render_pages_blocking(&path, max_pixels))
        .await
        .map_err(|e| MultiscribeError::Internal(format!("Render task panicked: {}", e)))?
}

/// Blocking implementation of page rendering.
fn render_pages_blocking(
    pdf_path: &Path,
    max_pixels: u32,
) -> Result<Vec<(usize, DynamicImage)>, MultiscribeError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| MultiscribeError::PdfiumBindingFailed(e.to_string()))?;
    let pdfium = Pdfium::new(bindings);

    let document = pdfium.load_pdf_from_file(pdf_path, None).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            MultiscribeError::PasswordRequired {
                path: pdf_path.to_path_buf(),
            }
        } else {
            MultiscribeError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: err_str,
            }
        }
    })?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("Rendering {} pages from {}", total_pages, pdf_path.display());

    let render_config = PdfRenderConfig::new()
        .set_target_width(max_pixels as i32)
        .set_maximum_height(max_pixels as i32);

    let mut results = Vec::with_capacity(total_pages);

    for idx in 0..total_pages {
        let page = pages
            .get(idx as u16)
            .map_err(|e| MultiscribeError::RenderFailed {
                page: idx + 1,
                detail: format!("{:?}", e),
            })?;

        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            MultiscribeError::RenderFailed {
                page: idx + 1,
                detail: format!("{:?}", e),
            }
        })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            idx + 1,
            image.width(),
            image.height()
        );

        results.push((idx, image));
    }

    Ok(results)
}
