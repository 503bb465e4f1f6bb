//! Human-readable assembly reports.

use std::io::{self, Write};

use fragment_config::Assembly;

/// Write one line per merged fragment, skipped fragment and warning.
///
/// # Errors
///
/// Propagates write failures from `out`.
///
/// # Examples
///
/// ```
/// use fragment_config::{Assembler, Environment, FeatureSelection, MemorySource};
/// use merge_config::report::write_report;
///
/// let source = MemorySource::new().with_file("logging.json", "{}");
/// let assembly = Assembler::new(source, FeatureSelection::new()).assemble(Environment::Base)?;
/// let mut out = Vec::new();
/// write_report(&mut out, &assembly)?;
/// let text = String::from_utf8(out)?;
/// assert!(text.starts_with("[Base] merged logging (memory/logging.json)\n"));
/// assert!(text.contains("[Base] skipped auth (feature Auth disabled)\n"));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn write_report(out: &mut dyn Write, assembly: &Assembly) -> io::Result<()> {
    let environment = assembly.environment();
    let report = assembly.report();
    for merged in report.merged() {
        writeln!(out, "[{environment}] merged {} ({})", merged.id, merged.location)?;
    }
    for skipped in report.skipped() {
        writeln!(
            out,
            "[{environment}] skipped {} (feature {} disabled)",
            skipped.name, skipped.feature
        )?;
    }
    for warning in report.warnings() {
        writeln!(out, "[{environment}] warning: {warning}")?;
    }
    Ok(())
}
