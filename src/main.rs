//! Binary entry point: parses the command line, wires up logging and
//! hands over to the dispatch in `command_line`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod command_line;
mod sat;

fn main() -> anyhow::Result<()> {
    let cli = command_line::cli::Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    command_line::cli::run(&cli)
}
