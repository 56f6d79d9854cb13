//! Environment-file loading and API-key lookup.
//!
//! API keys come from the process environment, optionally seeded from a
//! dotenv-style file first. An explicitly named file must exist; the default
//! `.env` probe stays silent when absent, matching how the underlying
//! `dotenvy` loader behaves.

use crate::error::{MultiscribeError, Result};
use std::path::Path;
use tracing::debug;

/// Load environment variables from a file.
///
/// * `Some(path)` — the file must exist and parse; failure is an error.
/// * `None` — probe for `./.env` and silently continue without it.
///
/// Existing process variables are never overwritten.
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| {
                MultiscribeError::InvalidConfig(format!(
                    "Failed to load env file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            debug!("Loaded env file: {}", path.display());
        }
        None => {
            if let Ok(path) = dotenvy::dotenv() {
                debug!("Loaded env file: {}", path.display());
            }
        }
    }
    Ok(())
}

/// Read a required API key from the environment.
///
/// Empty values count as missing: an `export GOOGLE_API_KEY=` line in a shell
/// profile should not masquerade as configuration.
pub fn require_key(var: &'static str, hint: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MultiscribeError::MissingApiKey {
            var,
            hint: hint.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_env_file(Some(Path::new("/nonexistent/.env"))).unwrap_err();
        assert!(matches!(err, MultiscribeError::InvalidConfig(_)));
    }

    #[test]
    fn explicit_file_populates_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.env");
        // Unique variable name: the process environment is shared across
        // parallel tests.
        writeln!(
            std::fs::File::create(&path).unwrap(),
            "MULTISCRIBE_TEST_ENVFILE_KEY=abc123"
        )
        .unwrap();

        load_env_file(Some(&path)).unwrap();
        assert_eq!(
            std::env::var("MULTISCRIBE_TEST_ENVFILE_KEY").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn require_key_rejects_missing() {
        let err = require_key("MULTISCRIBE_TEST_UNSET_KEY", "hint text").unwrap_err();
        match err {
            MultiscribeError::MissingApiKey { var, hint } => {
                assert_eq!(var, "MULTISCRIBE_TEST_UNSET_KEY");
                assert_eq!(hint, "hint text");
            }
            other => panic!("expected MissingApiKey, got {other:?}"),
        }
    }

    #[test]
    fn require_key_rejects_blank() {
        std::env::set_var("MULTISCRIBE_TEST_BLANK_KEY", "   ");
        let err = require_key("MULTISCRIBE_TEST_BLANK_KEY", "").unwrap_err();
        assert!(matches!(err, MultiscribeError::MissingApiKey { .. }));
    }

    #[test]
    fn require_key_returns_value() {
        std::env::set_var("MULTISCRIBE_TEST_SET_KEY", "sk-value");
        assert_eq!(require_key("MULTISCRIBE_TEST_SET_KEY", "").unwrap(), "sk-value");
    }
}
