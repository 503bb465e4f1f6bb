//! Per-run record of merged, skipped and missing fragments.

use std::fmt;

use crate::{CatalogEntry, Feature, Fragment, FragmentGate, FragmentId, FragmentName};

/// A fragment that contributed to the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedFragment {
    /// Fragment identity, including the environment qualifier.
    pub id: FragmentId,
    /// Where the fragment was read from.
    pub location: String,
}

/// A catalog fragment left out because its feature is disabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedFragment {
    /// Fragment name.
    pub name: FragmentName,
    /// Disabled feature gating the fragment.
    pub feature: Feature,
}

/// Non-fatal conditions found during assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssemblyWarning {
    /// An enabled fragment had neither a base nor an override document.
    EnabledFeatureMissingFragment {
        /// Fragment that was expected.
        fragment: FragmentName,
        /// Gate that admitted it.
        gate: FragmentGate,
    },
}

impl fmt::Display for AssemblyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnabledFeatureMissingFragment {
                fragment,
                gate: FragmentGate::Feature(feature),
            } => write!(
                f,
                "feature '{feature}' is enabled but fragment '{fragment}' was not found"
            ),
            Self::EnabledFeatureMissingFragment {
                fragment,
                gate: FragmentGate::Always,
            } => write!(f, "always-included fragment '{fragment}' was not found"),
        }
    }
}

/// What an assembly run merged, skipped and warned about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    merged: Vec<MergedFragment>,
    skipped: Vec<SkippedFragment>,
    warnings: Vec<AssemblyWarning>,
}

impl AssemblyReport {
    /// Fragments in the order they were merged.
    #[must_use]
    pub fn merged(&self) -> &[MergedFragment] {
        &self.merged
    }

    /// Fragments excluded by the selection, in catalog order.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedFragment] {
        &self.skipped
    }

    /// Non-fatal warnings.
    #[must_use]
    pub fn warnings(&self) -> &[AssemblyWarning] {
        &self.warnings
    }

    pub(super) fn record_merged(&mut self, fragment: &Fragment) {
        self.merged.push(MergedFragment {
            id: fragment.id().clone(),
            location: fragment.location().to_owned(),
        });
    }

    pub(super) fn record_skipped(&mut self, entry: &CatalogEntry) {
        if let FragmentGate::Feature(feature) = entry.gate() {
            self.skipped.push(SkippedFragment {
                name: entry.name().clone(),
                feature,
            });
        }
    }

    pub(super) fn record_warning(&mut self, warning: AssemblyWarning) {
        self.warnings.push(warning);
    }
}
