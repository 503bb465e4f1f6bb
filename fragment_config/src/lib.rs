//! Core crate for merging feature-gated configuration fragments.
//!
//! A fragment is a partial JSON configuration document contributed by one
//! feature area (`auth.json`, `security.json`, ...), optionally paired with
//! environment-specific overrides (`auth.Development.json`). The
//! [`Assembler`] selects fragments according to a [`FeatureSelection`], loads
//! them through a [`FragmentSource`] and folds them with the deep-merge rules
//! in [`merge`] into a single [`ConfigDocument`].
//!
//! ```rust
//! use fragment_config::{Assembler, Environment, Feature, FeatureSelection, MemorySource};
//! use serde_json::json;
//!
//! let source = MemorySource::new()
//!     .with_file("auth.json", r#"{"Auth": {"Authority": "https://issuer"}}"#)
//!     .with_file("auth.Development.json", r#"{"Auth": {"Authority": "https://localhost"}}"#);
//! let selection = FeatureSelection::from_enabled([Feature::Auth]);
//!
//! let assembly = Assembler::new(source, selection).assemble(Environment::Development)?;
//! assert_eq!(
//!     assembly.document().pointer("/Auth/Authority"),
//!     Some(&json!("https://localhost"))
//! );
//! # Ok::<_, std::sync::Arc<fragment_config::FragmentError>>(())
//! ```

mod assembler;
mod catalog;
mod document;
mod environment;
mod error;
mod feature;
mod loader;
pub mod merge;
mod source;

pub use assembler::{
    AssembledPair, Assembler, Assembly, AssemblyReport, AssemblyWarning, MergedFragment,
    SkippedFragment,
};
pub use catalog::{CatalogEntry, FragmentCatalog, FragmentGate, FragmentId, FragmentName};
pub use document::{ConfigDocument, NonObjectDocument};
pub use environment::Environment;
pub use error::{AggregatedErrors, FragmentError, FragmentResult};
pub use feature::{Feature, FeatureProbe, FeatureSelection, FeatureToggle};
pub use loader::{Fragment, FragmentLoader};
pub use merge::{merge_documents, merge_value};
pub use source::{DirectorySource, FragmentSource, MemorySource};
