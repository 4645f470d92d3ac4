//! Bulk lookups against [Team Cymru](https://www.team-cymru.org/)'s
//! [IP-to-ASN](https://www.team-cymru.org/IP-ASN-mapping.html) mapping via its WHOIS service.
//!
//! Please, see Team Cymru's documentation before using this library. Cymru also warns not to use
//! their mapping as Geo-IP service.
//!
//! A single lookup is done with [`CymruWhois::lookup`](whois/struct.CymruWhois.html). To look up
//! many addresses at once and print results as they arrive, see [`run`](run/fn.run.html).

use std::io;

use chrono::NaiveDate;
use thiserror::Error;

pub mod config;
pub mod logging;
pub mod output;
pub mod run;
pub mod whois;

pub use config::{Backend, Cli, Config, ConfigError};
pub use output::OutputFormat;
pub use run::{run, RunSummary};
pub use whois::CymruWhois;

/// Number of `|` separated fields in a verbose Cymru WHOIS answer
const FIELD_COUNT: usize = 7;

/// Prefix Cymru puts in front of answers it could not serve
pub(crate) const ERROR_PREFIX: &str = "Error:";


/// IP-to-ASN mapping information
///
/// Values are kept exactly as the server sent them, only trimmed of surrounding whitespace.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsRecord {
    as_number: String,
    as_name: String,
    query_address: String,
    bgp_prefix: String,
    country_code: String,
    registry: String,
    allocated: String,
}

impl AsRecord {
    /// BGP Origin's Autonomous System (AS) number
    pub fn as_number(&self) -> &str {
        &self.as_number
    }

    /// Autonomous System (AS) description
    pub fn as_name(&self) -> &str {
        &self.as_name
    }

    /// IP Address as echoed back by the server
    pub fn query_address(&self) -> &str {
        &self.query_address
    }

    /// BGP prefix
    pub fn bgp_prefix(&self) -> &str {
        &self.bgp_prefix
    }

    /// Country code
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Regional registrar name
    pub fn registry(&self) -> &str {
        &self.registry
    }

    /// BGP prefix allocation date, unparsed
    pub fn allocated(&self) -> &str {
        &self.allocated
    }

    /// BGP prefix allocation date, if the server sent one in YYYY-MM-DD format
    pub fn allocated_date(&self) -> Option<NaiveDate> {
        parse_date(&self.allocated)
    }
}


/// Errors from looking up a single address
///
/// Every variant names the address it belongs to, so failures can be reported without
/// stopping lookups of other addresses.
///
#[derive(Debug, Error)]
pub enum LookupError {
    /// Cymru answered with an `Error:` line
    #[error("cymru returned: '{message}' on '{address}'!")]
    Upstream { address: String, message: String },

    /// Resolving, connecting, writing or reading failed
    #[error("connection to whois server failed for '{address}': {source}")]
    Connection {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Answer did not have all the fields
    #[error("malformed answer for '{address}': expected 7 fields, got {fields} in '{line}'")]
    MalformedResponse {
        address: String,
        line: String,
        fields: usize,
    },
}

impl LookupError {
    /// Address the failed lookup was made for
    pub fn address(&self) -> &str {
        match self {
            LookupError::Upstream { address, .. }
            | LookupError::Connection { address, .. }
            | LookupError::MalformedResponse { address, .. } => address,
        }
    }
}


/// Parse one line of Cymru's verbose WHOIS answer into a struct
///
/// Sample answer to `-v -f 8.8.8.8` we try to parse:
///
///   "15169   | 8.8.8.8          | 8.8.8.0/24          | US | arin     | 2014-03-14 | GOOGLE, US"
///
/// The AS name is the last field and may itself contain `|`, so the line is split into at most
/// seven fields.
///
/// # Errors
///
/// Lines starting with `Error:` become `LookupError::Upstream`, lines with fewer than seven fields
/// become `LookupError::MalformedResponse`.
///
pub fn parse_response(address: &str, line: &str) -> Result<AsRecord, LookupError> {
    if line.starts_with(ERROR_PREFIX) {
        return Err(LookupError::Upstream {
            address: address.to_string(),
            message: line.trim().to_string(),
        });
    }

    let fields: Vec<&str> = line.splitn(FIELD_COUNT, '|').map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return Err(LookupError::MalformedResponse {
            address: address.to_string(),
            line: line.trim_end().to_string(),
            fields: fields.len(),
        });
    }

    Ok(AsRecord {
        as_number: fields[0].to_string(),
        query_address: fields[1].to_string(),
        bgp_prefix: fields[2].to_string(),
        country_code: fields[3].to_string(),
        registry: fields[4].to_string(),
        allocated: fields[5].to_string(),
        as_name: fields[6].to_string(),
    })
}


/// Parse date in YYYY-MM-DD format ignoring timezones
///
fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}


#[cfg(test)]
pub(crate) fn google_record() -> AsRecord {
    AsRecord {
        as_number: "15169".to_string(),
        as_name: "GOOGLE".to_string(),
        query_address: "8.8.8.8".to_string(),
        bgp_prefix: "8.8.8.0/24".to_string(),
        country_code: "US".to_string(),
        registry: "arin".to_string(),
        allocated: "2014-03-14".to_string(),
    }
}


#[cfg(test)]
mod tests {
    #[test]
    fn test_parse_response() {
        use super::parse_response;
        let line = "23028   | 216.90.108.31    | 216.90.108.0/24     | US | arin     | 1998-09-25 | TEAM-CYMRU - Team Cymru Inc., US\n";
        let record = parse_response("216.90.108.31", line).unwrap();
        assert_eq!(record.as_number(), "23028");
        assert_eq!(record.query_address(), "216.90.108.31");
        assert_eq!(record.bgp_prefix(), "216.90.108.0/24");
        assert_eq!(record.country_code(), "US");
        assert_eq!(record.registry(), "arin");
        assert_eq!(record.allocated(), "1998-09-25");
        assert_eq!(record.as_name(), "TEAM-CYMRU - Team Cymru Inc., US");
    }

    #[test]
    fn test_parse_response_keeps_server_formatting() {
        use super::parse_response;
        let line = "13335 | 2606:4700:4700::1111 | 2606:4700:4700::/48 | US | arin | 2011-11-01 | CLOUDFLARENET, US\n";
        let record = parse_response("2606:4700:4700:0:0:0:0:1111", line).unwrap();
        assert_eq!(record.query_address(), "2606:4700:4700::1111");
        assert_eq!(record.bgp_prefix(), "2606:4700:4700::/48");
    }

    #[test]
    fn test_parse_response_pipe_in_as_name() {
        use super::parse_response;
        let line = "64496 | 192.0.2.1 | 192.0.2.0/24 | ZZ | ripencc | 2006-02-17 | EXAMPLE | TEST NET\n";
        let record = parse_response("192.0.2.1", line).unwrap();
        assert_eq!(record.as_name(), "EXAMPLE | TEST NET");
    }

    #[test]
    fn test_parse_response_empty_fields() {
        use super::parse_response;
        let record = parse_response("192.0.2.1", "NA | 192.0.2.1 | NA | | other | |\n").unwrap();
        assert_eq!(record.as_number(), "NA");
        assert_eq!(record.country_code(), "");
        assert_eq!(record.allocated(), "");
        assert_eq!(record.as_name(), "");
        assert_eq!(record.allocated_date(), None);
    }

    #[test]
    fn test_parse_response_error_line() {
        use super::{LookupError, parse_response};
        let result = parse_response("300.1.1.1", "Error: no ASN or IP match on line 1.\n");
        match result {
            Err(LookupError::Upstream { address, message }) => {
                assert_eq!(address, "300.1.1.1");
                assert_eq!(message, "Error: no ASN or IP match on line 1.");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_error_line_with_fields() {
        use super::{LookupError, parse_response};
        let result = parse_response("192.0.2.1", "Error: | a | b | c | d | e | f\n");
        assert!(matches!(result, Err(LookupError::Upstream { .. })));
    }

    #[test]
    fn test_parse_response_too_few_fields() {
        use super::{LookupError, parse_response};
        for line in &["", "\n", "15169 | 8.8.8.8 | 8.8.8.0/24\n", "1|2|3|4|5|6\n"] {
            match parse_response("8.8.8.8", line) {
                Err(LookupError::MalformedResponse { address, fields, .. }) => {
                    assert_eq!(address, "8.8.8.8");
                    assert!(fields < 7);
                }
                other => panic!("expected malformed answer for {:?}, got {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_allocated_date() {
        use chrono::NaiveDate;
        let record = super::google_record();
        assert_eq!(record.allocated_date(), NaiveDate::from_ymd_opt(2014, 3, 14));
    }

    #[test]
    fn test_lookup_error_address() {
        use std::io;
        use super::LookupError;
        let err = LookupError::Connection {
            address: "192.0.2.7".to_string(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert_eq!(err.address(), "192.0.2.7");
        assert!(err.to_string().contains("192.0.2.7"));
        assert!(err.to_string().contains("refused"));
    }
}
