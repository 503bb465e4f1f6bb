//! CLI entrypoint for `merge-config`.

use std::io;

use clap::Parser;
use merge_config::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    merge_config::run(&cli, &mut stdout, &mut stderr).map_err(color_eyre::eyre::Report::from)
}

/// Log to stderr; `RUST_LOG` applies unless `-v` raises the level.
fn init_tracing(verbose: u8) -> color_eyre::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}
