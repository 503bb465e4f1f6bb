//! Constructors and aggregation helpers for `FragmentError`.

use std::sync::Arc;

use super::{AggregatedErrors, FragmentError};
use crate::FragmentId;

impl FragmentError {
    /// Tries to build a [`FragmentError`] from an iterator of errors.
    ///
    /// Returns `None` for an empty iterator, the inner error when a single
    /// uniquely owned error is supplied, and [`Self::Aggregate`] otherwise.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(arcs))));
        }
        let last = arcs.pop()?;
        Some(match Arc::try_unwrap(last) {
            Ok(err) => err,
            Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
        })
    }

    /// Construct an [`FragmentError::Invalid`] for a fragment.
    #[must_use]
    pub fn invalid(
        id: FragmentId,
        location: impl Into<String>,
        reason: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self::Invalid {
            id,
            location: location.into(),
            reason: reason.into(),
        })
    }

    /// Construct a [`FragmentError::StorageUnavailable`] for a storage location.
    #[must_use]
    pub fn storage_unavailable(location: impl Into<String>, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::StorageUnavailable {
            location: location.into(),
            source,
        })
    }

    /// Construct a [`FragmentError::Unreadable`] for a single file.
    #[must_use]
    pub fn unreadable(location: impl Into<String>, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::Unreadable {
            location: location.into(),
            source,
        })
    }

    /// Returns `true` for failures caused by a malformed fragment, including
    /// aggregates made only of such failures.
    #[must_use]
    pub fn is_invalid_fragment(&self) -> bool {
        match self {
            Self::Invalid { .. } => true,
            Self::Aggregate(errors) => errors.iter().all(Self::is_invalid_fragment),
            _ => false,
        }
    }
}
