//! Invalid fragments reported together.

use std::{error::Error, fmt, sync::Arc};

use super::FragmentError;

/// Invalid fragments collected during one assembly pass, in load order.
///
/// Rendered one numbered line per fragment:
///
/// ```
/// use fragment_config::FragmentError;
///
/// let err = FragmentError::try_aggregate(vec![
///     FragmentError::DuplicateFragment("auth".into()),
///     FragmentError::InvalidSelection("expected an object".into()),
/// ])
/// .ok_or("no errors")?;
/// let FragmentError::Aggregate(collected) = &err else {
///     return Err("expected an aggregate".into());
/// };
/// assert_eq!(collected.len(), 2);
/// assert!(collected.to_string().starts_with("1: fragment 'auth'"));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<FragmentError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<FragmentError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &FragmentError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, err) in self.0.iter().enumerate() {
            if position > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {err}", position + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}
