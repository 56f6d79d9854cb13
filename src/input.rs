//! Input validation: check a user-supplied file before handing it to a
//! backend or an API.
//!
//! The PDF libraries crash or produce opaque errors on non-PDF bytes, and the
//! generative-AI endpoints bill for malformed uploads before rejecting them.
//! Validating the magic bytes / extension up front turns both cases into a
//! meaningful error at zero cost.

use crate::error::MultiscribeError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Audio formats accepted for transcription, with their MIME types.
///
/// Matches the formats the Gemini and OpenAI transcription endpoints accept.
const AUDIO_FORMATS: &[(&str, &str)] = &[
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
];

/// Validate a local PDF path: existence, readability, `%PDF` magic bytes.
pub fn resolve_pdf(path: &Path) -> Result<PathBuf, MultiscribeError> {
    let path = path.to_path_buf();

    if !path.exists() {
        return Err(MultiscribeError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(MultiscribeError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(MultiscribeError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(MultiscribeError::FileNotFound { path });
        }
    }

    debug!("Resolved PDF input: {}", path.display());
    Ok(path)
}

/// A validated audio input with the MIME type the APIs expect.
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub path: PathBuf,
    pub mime_type: &'static str,
}

/// Validate a local audio path: existence plus a recognised extension.
pub fn resolve_audio(path: &Path) -> Result<AudioInput, MultiscribeError> {
    let path = path.to_path_buf();

    if !path.exists() {
        return Err(MultiscribeError::FileNotFound { path });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let mime_type = mime_for_audio(&ext).ok_or_else(|| MultiscribeError::UnsupportedAudio {
        path: path.clone(),
        detail: format!(
            "extension '.{}' is not one of {}",
            ext,
            AUDIO_FORMATS
                .iter()
                .map(|(e, _)| *e)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })?;

    debug!("Resolved audio input: {} ({})", path.display(), mime_type);
    Ok(AudioInput { path, mime_type })
}

/// Look up the MIME type for a lowercase audio extension.
pub fn mime_for_audio(ext: &str) -> Option<&'static str> {
    AUDIO_FORMATS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}
