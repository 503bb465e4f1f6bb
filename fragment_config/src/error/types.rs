//! Primary error enum for fragment loading and assembly.

use std::sync::Arc;

use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::FragmentId;

/// Result alias used throughout the crate.
///
/// Errors are reference counted so a single failure can be shared between an
/// [`FragmentError::Aggregate`] and the caller that reported it.
pub type FragmentResult<T> = Result<T, Arc<FragmentError>>;

/// Errors that can occur while loading fragments or assembling a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FragmentError {
    /// A fragment exists but is not a valid configuration document.
    #[error("fragment '{id}' at '{location}' is invalid: {reason}")]
    Invalid {
        /// Fragment that failed to parse.
        id: FragmentId,
        /// Storage location of the offending fragment.
        location: String,
        /// Human-readable parse failure.
        reason: String,
    },

    /// The fragment storage could not be reached at all.
    #[error("fragment storage '{location}' is unavailable: {source}")]
    StorageUnavailable {
        /// Storage that failed.
        location: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// One file in otherwise reachable storage could not be read.
    #[error("fragment file '{location}' cannot be read: {source}")]
    Unreadable {
        /// File that failed.
        location: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A feature name outside the supported set was supplied.
    #[error("unknown feature '{name}'; expected one of: {expected}")]
    UnknownFeature {
        /// Name as supplied by the caller.
        name: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },

    /// An environment name outside the supported set was supplied.
    #[error("unknown environment '{name}'; expected one of: {expected}")]
    UnknownEnvironment {
        /// Name as supplied by the caller.
        name: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },

    /// A fragment name cannot be mapped onto a file name.
    #[error("invalid fragment name '{name}': {reason}")]
    InvalidFragmentName {
        /// Name as supplied by the caller.
        name: String,
        /// Rule the name violates.
        reason: &'static str,
    },

    /// A catalog lists the same fragment twice.
    #[error("fragment '{0}' appears more than once in the catalog")]
    DuplicateFragment(String),

    /// A feature selection document or toggle is malformed.
    #[error("invalid feature selection: {0}")]
    InvalidSelection(String),

    /// Several fragments failed in one assembly run.
    #[error("multiple fragment errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
