//! Error types for bundle assembly.
//!
//! Every failure carries enough context (stage, artifact, path) for the caller
//! to diagnose it. Failures are terminal: the orchestrator never reports a
//! partially assembled bundle as usable.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

use super::builder::Stage;

/// Result type alias for bundle assembly.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while assembling a bundle.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Expected a directory and found a file, or the other way round.
    #[error("path conflict at {}: {reason}", .path.display())]
    PathConflict {
        /// Offending path
        path: PathBuf,
        /// What was expected there
        reason: &'static str,
    },

    /// Filesystem operation failed on a known path.
    #[error("{context} {}: {source}", .path.display())]
    IoFailure {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Archive entry would escape its extraction directory.
    #[error("unsafe entry {entry:?} in archive {}", .archive.display())]
    UnsafeArchiveEntry {
        /// Archive that carries the entry
        archive: PathBuf,
        /// Raw entry name
        entry: String,
    },

    /// Archive could not be read.
    #[error("failed to read archive {}: {source}", .archive.display())]
    Archive {
        /// Archive path
        archive: PathBuf,
        /// Underlying zip error
        source: zip::result::ZipError,
    },

    /// Template registration or rendering failed.
    #[error("template `{name}`: {reason}")]
    Template {
        /// Template name
        name: String,
        /// Handlebars error message
        reason: String,
    },

    /// Configuration asked for a bundle kind other than application/framework.
    #[error("unknown bundle kind `{0}` (expected `application` or `framework`)")]
    UnknownBundleKind(String),

    /// Operation invoked in the wrong assembly state.
    #[error("invalid bundle state: {0}")]
    InvalidState(String),

    /// A pipeline stage failed.
    #[error("stage `{stage}` failed: {source}")]
    Stage {
        /// Stage being executed
        stage: Stage,
        /// Cause
        source: Box<Error>,
    },

    /// IO error without path context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Walkdir traversal error.
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Free-form error.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Wraps this error with the stage that produced it.
    ///
    /// Already-staged errors are returned unchanged so the innermost stage wins.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            staged @ Error::Stage { .. } => staged,
            other => Error::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Returns the stage that failed, if this error came out of the pipeline.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Returns the innermost error, skipping stage wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Attaches a description to errors and missing values.
pub trait Context<T> {
    /// Converts into a [`Error::GenericError`] prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Lazily evaluated variant of [`Context::context`].
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Attaches filesystem context (operation + path) to IO results.
pub trait ErrorExt<T> {
    /// Maps an IO error into [`Error::IoFailure`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::IoFailure {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Returns early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
