//! Command-line options and the configuration built from them.

use std::fmt;
use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

use crate::output::OutputFormat;
use crate::whois::CYMRU_WHOIS_SERVER;

/// Exit status for a backend other than `cymru`
pub const EXIT_UNSUPPORTED_BACKEND: i32 = 128;

/// Exit status for arguments that could not be parsed
pub const EXIT_USAGE: i32 = 1;


/// Look up the Autonomous System of IP addresses
#[derive(Debug, Parser)]
#[command(name = "aslookup", version, about)]
pub struct Cli {
    /// Lookup backend to use
    #[arg(short = 'b', long = "backend", default_value = "cymru")]
    pub backend: String,

    /// IP Addresses to look up
    #[arg(short = 'a', value_name = "IP")]
    pub addresses: Vec<String>,

    /// Print human readable output
    #[arg(short = 'r', long = "human-readable")]
    pub human_readable: bool,

    /// Print short output
    #[arg(short = 's')]
    pub short: bool,

    /// WHOIS server to query, as host:port
    #[arg(long, hide = true, default_value = CYMRU_WHOIS_SERVER)]
    pub server: String,

    /// Log level for diagnostics on standard error (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,
}


/// Service answering the lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Cymru,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "cymru" => Ok(Backend::Cymru),
            other => Err(ConfigError::UnsupportedBackend(other.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cymru => f.write_str("cymru"),
        }
    }
}


#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Sorry, only implemented backend is \"cymru\" for the moment, not \"{0}\".")]
    UnsupportedBackend(String),
}


/// Options for one run, fixed once parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    pub addresses: Vec<String>,
    pub format: OutputFormat,
    /// Accepted for compatibility, currently has no effect on output
    pub short: bool,
    /// WHOIS server as `host:port`
    pub server: String,
}

impl Config {
    /// Validate parsed arguments
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedBackend` for any backend but `cymru`, whether or not
    /// addresses were given.
    ///
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Ok(Config {
            backend: cli.backend.parse()?,
            addresses: cli.addresses.clone(),
            format: OutputFormat::from_flag(cli.human_readable),
            short: cli.short,
            server: cli.server.clone(),
        })
    }
}
