#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! ddbpeek — fetch a quote or policy record from DynamoDB and print it as JSON.

mod aws;
mod cli;
mod commands;
mod prompt;
mod records;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputCtx, write_error};
use records::PeekError;

fn main() {
    let cli = Cli::parse();

    let result = init_logging(cli.verbose)
        .map_err(PeekError::from)
        .and_then(|()| {
            let ctx = OutputCtx::new(cli.output, cli.no_color, cli.debug);
            commands::dispatch(&cli, &ctx)
        });

    if let Err(err) = result {
        tracing::debug!(error = ?err, "fatal");
        write_error(&err, cli.output, cli.no_color);
        std::process::exit(err.exit_code());
    }
}

/// Log to stderr so stdout only ever carries the JSON document.
fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
