use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TofuError};

/// Hostnames must be strictly shorter than this many characters.
pub const HOSTNAME_LIMIT: usize = 256;

/// Unique lookup key for a trust record: `hostname:port`.
///
/// The rendered key is what appears at the start of each store line. A
/// hostname can never contain whitespace, so the key always ends at the first
/// whitespace byte of a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HostKey {
    hostname: String,
    port: u16,
    rendered: String,
}

impl HostKey {
    /// Build a key, validating the hostname.
    ///
    /// The hostname must be non-empty, shorter than [`HOSTNAME_LIMIT`]
    /// characters and free of whitespace and control characters.
    pub fn new(hostname: &str, port: u16) -> Result<Self> {
        if hostname.is_empty() {
            return Err(TofuError::usage("hostname", "must not be empty"));
        }
        let len = hostname.chars().count();
        if len >= HOSTNAME_LIMIT {
            return Err(TofuError::usage(
                "hostname",
                format!("{len} characters exceeds the limit of {}", HOSTNAME_LIMIT - 1),
            ));
        }
        if hostname.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TofuError::usage(
                "hostname",
                "must not contain whitespace or control characters",
            ));
        }

        Ok(Self {
            hostname: hostname.to_string(),
            port,
            rendered: format!("{hostname}:{port}"),
        })
    }

    /// The hostname part of the key
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The port part of the key
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// The key as written to the store
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for HostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl FromStr for HostKey {
    type Err = TofuError;

    /// Parse a rendered `hostname:port` key.
    ///
    /// Splits on the last colon so bare IPv6 hostnames such as `::1:7687`
    /// round-trip.
    fn from_str(s: &str) -> Result<Self> {
        let (hostname, port) = s
            .rsplit_once(':')
            .ok_or_else(|| TofuError::usage("host key", format!("'{s}' has no port")))?;
        let port = port
            .parse::<u16>()
            .map_err(|e| TofuError::usage("host key", format!("bad port in '{s}': {e}")))?;
        Self::new(hostname, port)
    }
}

impl TryFrom<String> for HostKey {
    type Error = TofuError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HostKey> for String {
    fn from(key: HostKey) -> Self {
        key.rendered
    }
}

impl AsRef<str> for HostKey {
    fn as_ref(&self) -> &str {
        &self.rendered
    }
}
