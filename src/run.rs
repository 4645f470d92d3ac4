//! Concurrent lookups of many addresses.

use std::io::{self, Write};
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::output::present;
use crate::whois::CymruWhois;
use crate::{AsRecord, LookupError};

/// Result of looking up one address
#[derive(Debug)]
pub struct Outcome {
    pub address: String,
    pub result: Result<AsRecord, LookupError>,
}

/// Counts of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}


/// Start one lookup task per address, with no limit on how many run at once
///
/// Outcomes arrive on the returned channel in completion order. The channel closes once every
/// task has finished, so draining it waits for all lookups.
///
pub fn dispatch(client: Arc<CymruWhois>, addresses: &[String]) -> mpsc::UnboundedReceiver<Outcome> {
    let (tx, rx) = mpsc::unbounded_channel();

    for address in addresses {
        let tx = tx.clone();
        let client = Arc::clone(&client);
        let address = address.clone();
        tokio::spawn(async move {
            let result = client.lookup(&address).await;
            // Receiver only goes away if the consumer stopped early
            let _ = tx.send(Outcome { address, result });
        });
    }

    rx
}


/// Look up every configured address and print records to `out` as they complete
///
/// A failed lookup is reported once on standard error and does not affect the others.
///
/// # Errors
///
/// Only failing to write to `out` stops the run.
///
pub async fn run<W: Write>(
    config: &Config,
    client: Arc<CymruWhois>,
    out: &mut W,
) -> io::Result<RunSummary> {
    info!(
        "looking up {} address(es) using {}",
        config.addresses.len(),
        config.backend
    );

    let mut outcomes = dispatch(client, &config.addresses);
    let mut summary = RunSummary::default();

    while let Some(outcome) = outcomes.recv().await {
        match outcome.result {
            Ok(record) => {
                summary.succeeded += 1;
                present(out, &record, config.format)?;
            }
            Err(err) => {
                summary.failed += 1;
                debug!("lookup of {} failed: {:?}", err.address(), err);
                eprintln!("{}", err);
            }
        }
    }
    out.flush()?;

    info!(
        "{} lookup(s) done, {} succeeded, {} failed",
        summary.total(),
        summary.succeeded,
        summary.failed
    );
    Ok(summary)
}
