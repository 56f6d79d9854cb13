//! Error types for the multiscribe library.
//!
//! Every fallible operation returns [`MultiscribeError`]. A failed extraction,
//! render, or API call terminates the operation that requested it — there is
//! no partial-result recovery inside a strategy run. The variants are grouped
//! by the stage that produces them so CLI error output reads like a diagnosis
//! rather than a stack trace.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the multiscribe library.
#[derive(Debug, Error)]
pub enum MultiscribeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// The file extension is not a recognised audio format.
    #[error("Unsupported audio file '{path}': {detail}")]
    UnsupportedAudio { path: PathBuf, detail: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password; multiscribe does not handle encrypted documents.
    #[error("PDF '{path}' is encrypted.\nDecrypt it first, e.g.: qpdf --decrypt input.pdf output.pdf")]
    PasswordRequired { path: PathBuf },

    /// A text extraction backend failed on the document.
    #[error("Extraction backend '{backend}' failed: {detail}")]
    ExtractionFailed { backend: &'static str, detail: String },

    /// pdfium returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RenderFailed { page: usize, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Install libpdfium or set PDFIUM_DYNAMIC_LIB_PATH to an existing copy."
    )]
    PdfiumBindingFailed(String),

    // ── API errors ────────────────────────────────────────────────────────
    /// A required API key environment variable is missing or empty.
    #[error("Missing API key: set {var} in the environment or an env file.\n{hint}")]
    MissingApiKey { var: &'static str, hint: String },

    /// Transport-level HTTP failure (DNS, TLS, timeout, connection reset).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{service} API error (HTTP {status}): {message}")]
    ApiError {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// The API answered 2xx but the response carried no usable content.
    #[error("{service} returned an empty response")]
    EmptyResponse { service: &'static str },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A page directory contains no PNG to reinterpret.
    #[error("No PNG page image found in '{dir}'")]
    NoPageImage { dir: PathBuf },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MultiscribeError>;
