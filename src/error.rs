//! Crate-level error types.
//!
//! This module defines the errors surfaced to callers of the library, with
//! actionable messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all library operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// Project descriptor errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundle assembly errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// Project descriptor errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Descriptor could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Unreadable {
        /// Descriptor path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Required field missing
    #[error("Missing required field: {field}")]
    MissingField {
        /// Field name, dotted from the table
        field: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as Inner;

        match self {
            BundlerError::Config(ConfigError::Unreadable { path, .. }) => vec![format!(
                "Check that {} exists and is readable",
                path.display()
            )],
            BundlerError::Config(ConfigError::MissingField { field }) => {
                vec![format!("Add `{}` to the project descriptor", field)]
            }
            BundlerError::Toml(_) => vec!["Fix the project descriptor and re-run".to_string()],
            BundlerError::Bundler(err) => match err.root() {
                Inner::PathConflict { path, .. } => vec![
                    format!("Remove or rename {}", path.display()),
                    "Or set `clean = true` under [bundle] to rebuild from scratch".to_string(),
                ],
                Inner::UnsafeArchiveEntry { archive, .. } => vec![format!(
                    "Rebuild or replace {}; it contains entries outside its root",
                    archive.display()
                )],
                Inner::UnknownBundleKind(_) => {
                    vec!["Use `application` or `framework` for [bundle] kind".to_string()]
                }
                _ => vec!["Check the error message above for specific details".to_string()],
            },
        }
    }

    /// Check if this error is recoverable
    ///
    /// Configuration mistakes and path conflicts can be fixed and the run
    /// repeated. A rejected archive needs a new artifact.
    pub fn is_recoverable(&self) -> bool {
        match self {
            BundlerError::Bundler(err) => {
                !matches!(err.root(), crate::bundler::Error::UnsafeArchiveEntry { .. })
            }
            _ => true,
        }
    }
}
