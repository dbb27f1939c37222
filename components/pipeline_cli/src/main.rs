//! Delayed Pipeline CLI
//!
//! Entry point. Parses CLI arguments, sets up logging and delegates to the
//! Runtime for execution.

use clap::Parser as ClapParser;
use pipeline_cli::{logging, Cli, CliError, Runtime};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    logging::init_tracing(cli.verbose)?;

    let mut runtime = Runtime::new(cli.virtual_time).with_config(cli.config());

    match &cli.chain {
        Some(location) => runtime.run_chain(location)?,
        None => runtime.run_pipeline(cli.input())?,
    };

    Ok(())
}
