//! `aslookup` command-line entry point.
//!
//! Parses arguments, initializes logging and hands the addresses to the library. Exit status is
//! 0 when all lookups ran (even if some of them failed), 1 for bad arguments and 128 for an
//! unsupported backend.

use std::io;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use aslookup::config::{EXIT_UNSUPPORTED_BACKEND, EXIT_USAGE};
use aslookup::logging::init_logger;
use aslookup::{run, Cli, Config, CymruWhois};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprint!("{}", err);
            process::exit(EXIT_USAGE);
        }
    };

    init_logger(cli.log_level).context("Failed to initialize logger")?;

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(EXIT_UNSUPPORTED_BACKEND);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&config, Arc::new(CymruWhois::with_server(config.server.clone())), &mut out)
        .await
        .context("Failed to write results")?;

    Ok(())
}
