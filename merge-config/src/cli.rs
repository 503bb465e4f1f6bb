//! Command-line interface definitions for `merge-config`.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Args, Parser, Subcommand};
use fragment_config::{Environment, FeatureToggle};

use crate::selection::SelectionInputs;
use crate::settings::SettingsOverrides;

/// Parsed CLI arguments for `merge-config`.
#[derive(Debug, Parser)]
#[command(name = "merge-config")]
#[command(about = "Merge feature-gated JSON configuration fragments")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Settings file (defaults to `.merge-config.toml` when present).
    #[arg(long, value_name = "path", global = true)]
    pub config: Option<Utf8PathBuf>,
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// `merge-config` subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the merged document for one environment.
    Assemble(AssembleArgs),
    /// Write the Production and Development documents.
    Write(WriteArgs),
    /// Validate every fragment and report stray files.
    Check(CheckArgs),
}

/// Fragment directory selection.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Directory holding the fragment files.
    #[arg(long, value_name = "dir")]
    pub fragments: Option<Utf8PathBuf>,
}

/// Feature selection flags.
#[derive(Debug, Clone, Default, Args)]
pub struct FeatureArgs {
    /// Enable or disable a feature (`Auth`, `Security=false`); repeatable.
    #[arg(long = "feature", value_name = "NAME[=BOOL]")]
    pub features: Vec<FeatureToggle>,
    /// JSON file mapping feature names to booleans.
    #[arg(long, value_name = "path")]
    pub features_file: Option<Utf8PathBuf>,
    /// Detect features from the layout of a project directory.
    #[arg(long, value_name = "project-root")]
    pub detect: Option<Utf8PathBuf>,
}

impl FeatureArgs {
    /// Borrow the flags as selection inputs.
    #[must_use]
    pub fn inputs(&self) -> SelectionInputs<'_> {
        SelectionInputs {
            detect: self.detect.as_deref(),
            features_file: self.features_file.as_deref(),
            toggles: &self.features,
        }
    }
}

/// Arguments for `assemble`.
#[derive(Debug, Clone, Default, Args)]
pub struct AssembleArgs {
    /// Fragment directory.
    #[command(flatten)]
    pub source: SourceArgs,
    /// Environment whose overrides are applied.
    #[arg(long, short, value_name = "env")]
    pub environment: Option<Environment>,
    /// Feature selection.
    #[command(flatten)]
    pub features: FeatureArgs,
}

/// Arguments for `write`.
#[derive(Debug, Clone, Default, Args)]
pub struct WriteArgs {
    /// Fragment directory.
    #[command(flatten)]
    pub source: SourceArgs,
    /// Directory receiving the documents.
    #[arg(long, value_name = "dir")]
    pub output_dir: Option<Utf8PathBuf>,
    /// File stem of the documents.
    #[arg(long, value_name = "stem")]
    pub stem: Option<String>,
    /// Print what would be written without touching the file system.
    #[arg(long)]
    pub dry_run: bool,
    /// Feature selection.
    #[command(flatten)]
    pub features: FeatureArgs,
}

/// Arguments for `check`.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    /// Fragment directory.
    #[command(flatten)]
    pub source: SourceArgs,
}

impl Command {
    /// Settings supplied by this command's flags.
    #[must_use]
    pub fn overrides(&self) -> SettingsOverrides {
        match self {
            Self::Assemble(args) => SettingsOverrides {
                fragments: args.source.fragments.clone(),
                environment: args.environment,
                ..SettingsOverrides::default()
            },
            Self::Write(args) => SettingsOverrides {
                fragments: args.source.fragments.clone(),
                output_dir: args.output_dir.clone(),
                stem: args.stem.clone(),
                ..SettingsOverrides::default()
            },
            Self::Check(args) => SettingsOverrides {
                fragments: args.source.fragments.clone(),
                ..SettingsOverrides::default()
            },
        }
    }
}

impl Cli {
    /// Settings file path, if one was given.
    #[must_use]
    pub fn config_path(&self) -> Option<&Utf8Path> {
        self.config.as_deref()
    }
}
