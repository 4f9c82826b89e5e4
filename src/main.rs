//! php-class-dumper CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use php_class_dumper::{Cli, ExtractorError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<ExtractorError>()
                .map(ExtractorError::exit_code)
                .unwrap_or(ExitCode::FAILURE)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    cli.execute()?;
    Ok(())
}

/// Log to stderr; RUST_LOG overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("php_class_dumper={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
