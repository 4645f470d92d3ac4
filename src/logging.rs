//! Logger initialization.

use std::io::Write;

use log::{LevelFilter, SetLoggerError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Logger initialization error: {0}")]
    AlreadyInitialized(#[from] SetLoggerError),
}

/// Initializes `env_logger` writing to standard error.
///
/// `RUST_LOG` is read first; `level` then overrides it for every module, so
/// `--log-level` on the command line always wins. Uses `try_init` so a second
/// call returns an error instead of panicking.
pub fn init_logger(level: LevelFilter) -> Result<(), LoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("aslookup", level);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.target(env_logger::Target::Stderr);

    builder.try_init()?;
    Ok(())
}
