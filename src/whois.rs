//! Team Cymru WHOIS client.

use std::io;

use log::debug;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::{parse_response, AsRecord, LookupError, ERROR_PREFIX};

/// Cymru's IPv4 WHOIS server
pub const CYMRU_WHOIS_SERVER: &str = "v4.whois.cymru.com:43";


/// Client for Cymru's IP-to-ASN WHOIS service
///
/// Every lookup opens its own connection, so one client can be shared between any number of
/// concurrent lookups.
///
#[derive(Debug, Clone)]
pub struct CymruWhois {
    server: String,
}

impl Default for CymruWhois {
    fn default() -> Self {
        CymruWhois::new()
    }
}

impl CymruWhois {
    /// Client talking to `v4.whois.cymru.com` on port 43
    pub fn new() -> Self {
        Self::with_server(CYMRU_WHOIS_SERVER)
    }

    /// Client talking to another server speaking the same protocol, given as `host:port`
    pub fn with_server(server: impl Into<String>) -> Self {
        CymruWhois {
            server: server.into(),
        }
    }

    /// Server address as `host:port`
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Query Cymru's IP-to-ASN mapping for one address
    ///
    /// Sends `-v -f <address>` and parses the single line Cymru answers with. The address is sent
    /// as given, without checking that it is a valid IP address.
    ///
    /// No caching, retries or timeouts are applied.
    ///
    /// # Errors
    ///
    /// Network failures, including the server closing the connection before a full line arrives,
    /// are returned as `LookupError::Connection`. Bytes that are not valid UTF-8 are replaced with
    /// U+FFFD rather than failing the lookup. See [`parse_response`](../fn.parse_response.html)
    /// for errors about the answer itself.
    ///
    pub async fn lookup(&self, address: &str) -> Result<AsRecord, LookupError> {
        let line = self
            .query(address)
            .await
            .map_err(|source| LookupError::Connection {
                address: address.to_string(),
                source,
            })?;

        if !line.ends_with('\n') && !line.starts_with(ERROR_PREFIX) {
            return Err(LookupError::Connection {
                address: address.to_string(),
                source: io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed before a full line was received",
                ),
            });
        }

        parse_response(address, &line)
    }

    /// Send the query and read back the first line, newline included if one arrived
    async fn query(&self, address: &str) -> io::Result<String> {
        debug!("connecting to {} for {}", self.server, address);
        let mut stream = TcpStream::connect(&self.server).await?;
        stream
            .write_all(format!("-v -f {}\n", address).as_bytes())
            .await?;

        let mut reader = BufReader::new(stream);
        let mut raw = Vec::new();
        reader.read_until(b'\n', &mut raw).await?;
        let line = String::from_utf8_lossy(&raw).into_owned();
        debug!("{} answered for {}: {:?}", self.server, address, line);
        Ok(line)
    }
}
