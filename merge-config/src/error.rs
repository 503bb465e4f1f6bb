//! Error types for `merge-config`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use fragment_config::FragmentError;
use thiserror::Error;

/// Result alias for `merge-config` operations.
pub type Result<T, E = MergeConfigError> = std::result::Result<T, E>;

/// Errors surfaced by the `merge-config` commands.
#[derive(Debug, Error)]
pub enum MergeConfigError {
    /// Loading, parsing or assembling fragments failed.
    #[error(transparent)]
    Fragment(#[from] Arc<FragmentError>),

    /// Tool settings could not be loaded.
    #[error("failed to load settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    /// A document could not be serialised.
    #[error("failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File system access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Writing to the output streams failed.
    #[error("failed to write output: {0}")]
    Stream(#[from] std::io::Error),

    /// The output file stem cannot be used as a file name.
    #[error("invalid output stem '{stem}': {reason}")]
    InvalidStem {
        /// Stem as configured.
        stem: String,
        /// Rule the stem violates.
        reason: String,
    },

    /// `check` found invalid fragments.
    #[error("{count} invalid fragment(s) found")]
    CheckFailed {
        /// Number of invalid fragments.
        count: usize,
    },
}

impl From<FragmentError> for MergeConfigError {
    fn from(err: FragmentError) -> Self {
        Self::Fragment(Arc::new(err))
    }
}

impl From<figment::Error> for MergeConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}
