//! Path handle over a known-hosts store.

use std::path::{Path, PathBuf};

use tofu_core::{Fingerprint, HostKey, Result, StoreRecord, StoredFingerprint};

use crate::{locator, lookup, writer};

/// Where the verification engine reads and records trusted fingerprints.
pub trait TrustStore {
    /// Stored fingerprint for `key`, or `None` if the host is unknown
    fn lookup(&self, key: &HostKey) -> Result<Option<StoredFingerprint>>;

    /// Durably record `fingerprint` as the trusted value for `key`
    fn trust(&self, key: &HostKey, fingerprint: &Fingerprint) -> Result<()>;
}

/// A known-hosts store at a resolved path.
///
/// The handle holds only the path. Every call opens, reads or replaces the
/// file on its own, so handles are cheap to clone and never hold a file open
/// between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownHosts {
    path: PathBuf,
}

impl KnownHosts {
    /// Use the store at `path`
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the explicit path if given, the per-user default otherwise
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        locator::resolve_store_path(explicit).map(Self::at)
    }

    /// Location of the store file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file currently exists
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Stored fingerprint for `key`, if any
    pub fn lookup(&self, key: &HostKey) -> Result<Option<Fingerprint>> {
        lookup::lookup_fingerprint(&self.path, key)
    }

    /// Stored fingerprint for `key` with its truncation flag
    pub fn lookup_stored(&self, key: &HostKey) -> Result<Option<StoredFingerprint>> {
        lookup::lookup_stored(&self.path, key)
    }

    /// All well-formed records, in file order
    pub fn records(&self) -> Result<Vec<StoreRecord>> {
        lookup::list_records(&self.path)
    }

    /// Add or replace the record for `key`
    pub fn trust(&self, key: &HostKey, fingerprint: &Fingerprint) -> Result<()> {
        writer::write_record(&self.path, &StoreRecord::new(key.clone(), fingerprint.clone()))
    }

    /// Remove the record for `key`, returning whether one existed
    pub fn forget(&self, key: &HostKey) -> Result<bool> {
        writer::remove_record(&self.path, key)
    }
}

impl TrustStore for KnownHosts {
    fn lookup(&self, key: &HostKey) -> Result<Option<StoredFingerprint>> {
        self.lookup_stored(key)
    }

    fn trust(&self, key: &HostKey, fingerprint: &Fingerprint) -> Result<()> {
        Self::trust(self, key, fingerprint)
    }
}
