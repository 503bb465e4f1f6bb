//! Consistency checks over a fragment directory.

use std::io::{self, Write};
use std::sync::Arc;

use fragment_config::{
    Environment, FragmentCatalog, FragmentError, FragmentId, FragmentLoader, FragmentResult,
    FragmentSource,
};

/// Outcome of [`check_fragments`].
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Fragment files that parsed successfully.
    pub valid: Vec<FragmentId>,
    /// Fragment files that failed to parse, in catalog order.
    pub invalid: Vec<Arc<FragmentError>>,
    /// `.json` files matching no catalog fragment and environment.
    pub unrecognised: Vec<String>,
}

impl CheckReport {
    /// Returns `true` when no fragment is invalid.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Load every catalog fragment for every environment and look for stray
/// files.
///
/// # Errors
///
/// Returns [`FragmentError::StorageUnavailable`] when the source cannot be
/// reached or listed. Invalid and unreadable fragments are reported, not
/// returned.
pub fn check_fragments<S: FragmentSource>(
    source: &S,
    catalog: &FragmentCatalog,
) -> FragmentResult<CheckReport> {
    let loader = FragmentLoader::new(source);
    let mut report = CheckReport::default();
    for entry in catalog.entries() {
        for environment in Environment::ALL {
            match loader.load(entry.name(), environment) {
                Ok(Some(fragment)) => report.valid.push(fragment.id().clone()),
                Ok(None) => {}
                Err(err) if err.is_invalid_fragment() => report.invalid.push(err),
                Err(err) => return Err(err),
            }
        }
    }
    report.unrecognised = source
        .list()?
        .into_iter()
        .filter(|name| name.ends_with(".json"))
        .filter(|name| {
            FragmentId::from_file_name(name)
                .is_none_or(|id| catalog.get(id.name().as_str()).is_none())
        })
        .collect();
    for name in &report.unrecognised {
        tracing::warn!(file = %name, "file matches no known fragment");
    }
    Ok(report)
}

/// Print the check outcome, one line per finding.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn write_check_report(out: &mut dyn Write, report: &CheckReport) -> io::Result<()> {
    for id in &report.valid {
        writeln!(out, "ok {id}")?;
    }
    for err in &report.invalid {
        writeln!(out, "invalid: {err}")?;
    }
    for name in &report.unrecognised {
        writeln!(out, "unrecognised: {name}")?;
    }
    writeln!(
        out,
        "{} valid, {} invalid, {} unrecognised",
        report.valid.len(),
        report.invalid.len(),
        report.unrecognised.len()
    )
}
