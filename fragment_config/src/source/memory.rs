//! Fragments held in memory, for embedded fragment sets and tests.

use std::collections::BTreeMap;

use super::FragmentSource;
use crate::FragmentResult;

/// An in-memory map from file name to contents.
///
/// ```rust
/// use fragment_config::{FragmentSource, MemorySource};
///
/// let source = MemorySource::new().with_file("auth.json", "{}");
/// assert_eq!(source.read("auth.json")?, Some(b"{}".to_vec()));
/// assert_eq!(source.read("http.json")?, None);
/// # Ok::<_, std::sync::Arc<fragment_config::FragmentError>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySource {
    label: Option<String>,
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            label: None,
            files: BTreeMap::new(),
        }
    }

    /// Name the source in reports; defaults to `memory`.
    #[must_use]
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder-style variant of [`MemorySource::insert`].
    #[must_use]
    pub fn with_file(mut self, file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(file_name, contents);
        self
    }

    /// Store `contents` under `file_name`, replacing any previous contents.
    pub fn insert(&mut self, file_name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(file_name.into(), contents.into());
    }
}

impl FragmentSource for MemorySource {
    fn location(&self) -> String {
        self.label.clone().unwrap_or_else(|| "memory".to_owned())
    }

    fn read(&self, file_name: &str) -> FragmentResult<Option<Vec<u8>>> {
        Ok(self.files.get(file_name).cloned())
    }

    fn list(&self) -> FragmentResult<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }
}
