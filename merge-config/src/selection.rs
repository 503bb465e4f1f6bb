//! Resolve the feature selection for a run.
//!
//! Layers, lowest to highest: project detection, the settings `[features]`
//! table, a `--features-file` document, then individual `--feature` toggles.
//! Each layer only overrides the features it names.

use camino::Utf8Path;
use fragment_config::{FeatureProbe, FeatureSelection, FeatureToggle};

use crate::error::Result;
use crate::fs_helpers::read_to_string;

/// Feature inputs gathered from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionInputs<'a> {
    /// Project root to run the default [`FeatureProbe`] against.
    pub detect: Option<&'a Utf8Path>,
    /// JSON document mapping feature names to booleans.
    pub features_file: Option<&'a Utf8Path>,
    /// Explicit toggles, applied in order.
    pub toggles: &'a [FeatureToggle],
}

/// Combine `configured` with the command-line inputs.
///
/// # Errors
///
/// Returns an error when detection cannot read the project root or the
/// features file is unreadable or malformed.
pub fn resolve_selection(
    configured: &FeatureSelection,
    inputs: SelectionInputs<'_>,
) -> Result<FeatureSelection> {
    let mut selection = match inputs.detect {
        Some(root) => FeatureProbe::default().detect(root)?,
        None => FeatureSelection::new(),
    };
    selection.overlay(configured);
    if let Some(path) = inputs.features_file {
        let contents = read_to_string(path)?;
        selection.overlay(&FeatureSelection::from_json_str(&contents)?);
    }
    for toggle in inputs.toggles {
        selection.apply(*toggle);
    }
    tracing::debug!(?selection, "resolved feature selection");
    Ok(selection)
}
