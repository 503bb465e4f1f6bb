//! Output planning and writing for the `write` command.

use camino::{Utf8Path, Utf8PathBuf};
use fragment_config::{AssembledPair, Assembly, Environment, FragmentName};

use crate::error::{MergeConfigError, Result};
use crate::fs_helpers::ensure_dir;

/// A document ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    /// File name inside the output directory.
    pub file_name: String,
    /// Full path of the file.
    pub path: Utf8PathBuf,
    /// Environment the document was assembled for.
    pub environment: Environment,
    /// Canonical JSON text.
    pub contents: String,
}

/// File name for `environment`: `<stem>.json` for Production and Base,
/// `<stem>.<Environment>.json` otherwise.
#[must_use]
pub fn output_file_name(stem: &str, environment: Environment) -> String {
    match environment {
        Environment::Base | Environment::Production => format!("{stem}.json"),
        other => format!("{stem}.{other}.json"),
    }
}

/// Render both documents of `pair` and decide where they go.
///
/// # Errors
///
/// Returns [`MergeConfigError::InvalidStem`] when `stem` is not a plain file
/// stem, and [`MergeConfigError::Json`] when serialisation fails.
pub fn plan_outputs(
    pair: &AssembledPair,
    output_dir: &Utf8Path,
    stem: &str,
) -> Result<Vec<PlannedOutput>> {
    FragmentName::new(stem).map_err(|err| MergeConfigError::InvalidStem {
        stem: stem.to_owned(),
        reason: err.to_string(),
    })?;
    [&pair.production, &pair.development]
        .into_iter()
        .map(|assembly| plan_one(assembly, output_dir, stem))
        .collect()
}

fn plan_one(assembly: &Assembly, output_dir: &Utf8Path, stem: &str) -> Result<PlannedOutput> {
    let file_name = output_file_name(stem, assembly.environment());
    Ok(PlannedOutput {
        path: output_dir.join(&file_name),
        file_name,
        environment: assembly.environment(),
        contents: assembly.document().to_canonical_json()?,
    })
}

/// Write every planned output into `output_dir`, creating it when missing.
///
/// # Errors
///
/// Returns [`MergeConfigError::Io`] when the directory or a file cannot be
/// written.
pub fn write_outputs(output_dir: &Utf8Path, outputs: &[PlannedOutput]) -> Result<()> {
    let dir = ensure_dir(output_dir)?;
    for output in outputs {
        dir.write(&output.file_name, &output.contents)
            .map_err(|source| MergeConfigError::Io {
                path: output.path.clone(),
                source,
            })?;
        tracing::info!(
            path = %output.path,
            environment = %output.environment,
            "wrote configuration"
        );
    }
    Ok(())
}
