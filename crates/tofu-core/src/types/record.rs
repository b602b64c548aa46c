use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Fingerprint, HostKey};

/// One line of a known-hosts store: `<host key> <fingerprint>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Endpoint the fingerprint belongs to
    pub host: HostKey,
    /// Last trusted fingerprint for the endpoint
    pub fingerprint: Fingerprint,
}

impl StoreRecord {
    /// Create a record
    #[must_use]
    pub const fn new(host: HostKey, fingerprint: Fingerprint) -> Self {
        Self { host, fingerprint }
    }

    /// The record as a store line, including the trailing newline
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for StoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.host, self.fingerprint)
    }
}
