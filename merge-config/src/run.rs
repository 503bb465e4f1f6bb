//! Command dispatch.

use std::io::Write;

use fragment_config::{Assembler, DirectorySource, FragmentCatalog};

use crate::check::{check_fragments, write_check_report};
use crate::cli::{Cli, Command};
use crate::error::{MergeConfigError, Result};
use crate::output::{plan_outputs, write_outputs};
use crate::report::write_report;
use crate::selection::resolve_selection;
use crate::settings::load_settings;

/// Execute `cli`, writing documents to `out` and diagnostics to `err`.
///
/// # Errors
///
/// Returns an error for any fatal condition: unreadable settings, invalid
/// fragments, unreachable storage, or failed writes. Warnings are printed
/// and do not fail the run.
pub fn run(cli: &Cli, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
    let settings = load_settings(cli.config_path(), &cli.command.overrides())?;
    let source = DirectorySource::open(settings.fragments.clone())?;
    match &cli.command {
        Command::Assemble(args) => {
            let selection = resolve_selection(&settings.features, args.features.inputs())?;
            let assembly = Assembler::new(source, selection).assemble(settings.environment)?;
            write_report(err, &assembly)?;
            out.write_all(assembly.document().to_canonical_json()?.as_bytes())?;
        }
        Command::Write(args) => {
            let selection = resolve_selection(&settings.features, args.features.inputs())?;
            let pair = Assembler::new(source, selection).assemble_pair()?;
            write_report(err, &pair.production)?;
            write_report(err, &pair.development)?;
            let planned = plan_outputs(&pair, &settings.output_dir, &settings.stem)?;
            if args.dry_run {
                for output in &planned {
                    writeln!(out, "would write {}", output.path)?;
                    out.write_all(output.contents.as_bytes())?;
                }
            } else {
                write_outputs(&settings.output_dir, &planned)?;
                for output in &planned {
                    writeln!(out, "wrote {}", output.path)?;
                }
            }
        }
        Command::Check(_) => {
            let report = check_fragments(&source, &FragmentCatalog::default())?;
            write_check_report(out, &report)?;
            if !report.is_ok() {
                return Err(MergeConfigError::CheckFailed {
                    count: report.invalid.len(),
                });
            }
        }
    }
    Ok(())
}
