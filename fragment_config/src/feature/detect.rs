//! Derive a [`FeatureSelection`] from the layout of a generated project.
//!
//! The assembler never inspects the project tree itself; this adapter turns
//! marker paths into an explicit selection that callers pass in.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use super::{Feature, FeatureSelection};
use crate::{FragmentError, FragmentResult};

/// Maps each feature to marker paths whose presence enables it.
///
/// The default probe looks for `src/<Feature>` directories, plus
/// `src/Features` for [`Feature::FeatureFlags`].
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use fragment_config::{Feature, FeatureProbe};
///
/// let selection = FeatureProbe::empty()
///     .with_marker(Feature::Auth, "src/Identity")
///     .detect(Utf8Path::new("MyProject"))?;
/// # Ok::<_, std::sync::Arc<fragment_config::FragmentError>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureProbe {
    markers: BTreeMap<Feature, Vec<Utf8PathBuf>>,
}

impl Default for FeatureProbe {
    fn default() -> Self {
        let probe = Feature::ALL.into_iter().fold(Self::empty(), |probe, feature| {
            probe.with_marker(feature, Utf8Path::new("src").join(feature.as_str()))
        });
        probe.with_marker(Feature::FeatureFlags, "src/Features")
    }
}

impl FeatureProbe {
    /// Create a probe with no markers; every feature detects as disabled.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            markers: BTreeMap::new(),
        }
    }

    /// Add a marker path, relative to the project root, for `feature`.
    #[must_use]
    pub fn with_marker(mut self, feature: Feature, marker: impl Into<Utf8PathBuf>) -> Self {
        self.markers.entry(feature).or_default().push(marker.into());
        self
    }

    /// Marker paths registered for `feature`.
    #[must_use]
    pub fn markers(&self, feature: Feature) -> &[Utf8PathBuf] {
        self.markers
            .get(&feature)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Inspect `root` and return a selection with an explicit entry for every
    /// feature.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::StorageUnavailable`] when `root` cannot be
    /// opened as a directory.
    pub fn detect(&self, root: &Utf8Path) -> FragmentResult<FeatureSelection> {
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(|err| FragmentError::storage_unavailable(root.as_str(), err))?;
        let selection = Feature::ALL
            .into_iter()
            .map(|feature| {
                let found = self
                    .markers(feature)
                    .iter()
                    .find(|marker| dir.exists(marker.as_path()));
                if let Some(marker) = found {
                    tracing::debug!(%feature, %marker, "feature detected from project layout");
                }
                (feature, found.is_some())
            })
            .collect();
        Ok(selection)
    }
}
