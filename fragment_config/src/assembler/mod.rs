//! Drives the loader and the merger for one feature selection.

mod report;

use std::sync::Arc;

use crate::{
    ConfigDocument, Environment, FeatureSelection, FragmentCatalog, FragmentError, FragmentLoader,
    FragmentResult, FragmentSource,
};

pub use report::{AssemblyReport, AssemblyWarning, MergedFragment, SkippedFragment};

/// The merged document for one environment and what went into it.
#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    environment: Environment,
    document: ConfigDocument,
    report: AssemblyReport,
}

impl Assembly {
    /// Environment the document was assembled for.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// The merged document.
    #[must_use]
    pub const fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Fragments merged, skipped and warned about.
    #[must_use]
    pub const fn report(&self) -> &AssemblyReport {
        &self.report
    }

    /// Split into document and report.
    #[must_use]
    pub fn into_parts(self) -> (ConfigDocument, AssemblyReport) {
        (self.document, self.report)
    }
}

/// Production and Development assemblies produced from one selection.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledPair {
    /// Written as the unqualified settings file.
    pub production: Assembly,
    /// Written as the `.Development` settings file.
    pub development: Assembly,
}

/// Assembles configuration documents from catalog fragments.
///
/// Every run starts from an empty document; nothing is cached between runs.
#[derive(Debug)]
pub struct Assembler<S> {
    loader: FragmentLoader<S>,
    catalog: FragmentCatalog,
    selection: FeatureSelection,
}

impl<S: FragmentSource> Assembler<S> {
    /// Create an assembler over the default catalog.
    #[must_use]
    pub fn new(source: S, selection: FeatureSelection) -> Self {
        Self {
            loader: FragmentLoader::new(source),
            catalog: FragmentCatalog::default(),
            selection,
        }
    }

    /// Replace the catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: FragmentCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Catalog driving the merge order.
    #[must_use]
    pub const fn catalog(&self) -> &FragmentCatalog {
        &self.catalog
    }

    /// Selection gating the catalog.
    #[must_use]
    pub const fn selection(&self) -> &FeatureSelection {
        &self.selection
    }

    /// Assemble the document for `environment`.
    ///
    /// Base fragments are merged in catalog order, followed by the
    /// `<name>.<Environment>.json` overrides in the same order. Fragments whose
    /// feature is disabled are never read.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::Invalid`] (or an aggregate of every invalid
    /// fragment, in load order) when any fragment fails to parse, and
    /// [`FragmentError::StorageUnavailable`] as soon as the source cannot be
    /// read.
    pub fn assemble(&self, environment: Environment) -> FragmentResult<Assembly> {
        let mut document = ConfigDocument::new();
        let mut report = AssemblyReport::default();
        let mut invalid: Vec<Arc<FragmentError>> = Vec::new();
        let mut found = vec![false; self.catalog.entries().len()];

        let override_pass = (!environment.is_base()).then_some(environment);

        for pass in std::iter::once(Environment::Base).chain(override_pass) {
            for (index, entry) in self.catalog.entries().iter().enumerate() {
                if !entry.gate().is_open(&self.selection) {
                    if pass.is_base() {
                        report.record_skipped(entry);
                    }
                    continue;
                }
                match self.loader.load(entry.name(), pass) {
                    Ok(Some(fragment)) => {
                        tracing::debug!(
                            fragment = %fragment.id(),
                            location = fragment.location(),
                            "merging fragment"
                        );
                        report.record_merged(&fragment);
                        document.merge_from(fragment.into_document());
                        if let Some(slot) = found.get_mut(index) {
                            *slot = true;
                        }
                    }
                    Ok(None) => {}
                    Err(err) if err.is_invalid_fragment() => invalid.push(err),
                    Err(err) => return Err(err),
                }
            }
        }

        if let Some(err) = FragmentError::try_aggregate(invalid) {
            return Err(Arc::new(err));
        }

        for (entry, present) in self.catalog.entries().iter().zip(&found) {
            if !present && entry.gate().is_open(&self.selection) {
                let warning = AssemblyWarning::EnabledFeatureMissingFragment {
                    fragment: entry.name().clone(),
                    gate: entry.gate(),
                };
                tracing::warn!(%environment, "{warning}");
                report.record_warning(warning);
            }
        }

        tracing::info!(
            %environment,
            merged = report.merged().len(),
            skipped = report.skipped().len(),
            warnings = report.warnings().len(),
            "assembled configuration"
        );
        Ok(Assembly {
            environment,
            document,
            report,
        })
    }

    /// Assemble the Production and Development documents.
    ///
    /// # Errors
    ///
    /// Fails with the first error from either assembly.
    pub fn assemble_pair(&self) -> FragmentResult<AssembledPair> {
        Ok(AssembledPair {
            production: self.assemble(Environment::Production)?,
            development: self.assemble(Environment::Development)?,
        })
    }
}
