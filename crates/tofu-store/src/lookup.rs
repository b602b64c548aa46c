//! Reading records from a known-hosts store.
//!
//! Readers take no lock. Writers only ever replace the store by rename, so a
//! reader sees either the old file or the new one in full.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::{debug, error, warn};

use tofu_core::{Fingerprint, HostKey, Result, StoreRecord, StoredFingerprint, TofuError};

use crate::line;

/// Open the store for reading. A missing store is `Ok(None)`.
pub(crate) fn open_store(path: &Path) -> Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "known-hosts store does not exist");
            Ok(None)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to open known-hosts store");
            Err(TofuError::io(path, e))
        }
    }
}

/// Read the next line, newline included. Returns false at end of file.
pub(crate) fn next_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    path: &Path,
) -> Result<bool> {
    buf.clear();
    match reader.read_until(b'\n', buf) {
        Ok(n) => Ok(n > 0),
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed reading known-hosts store");
            Err(TofuError::io(path, e))
        }
    }
}

/// Look up the stored fingerprint for `key`.
///
/// Returns `Ok(None)` when the store does not exist or holds no record for
/// the key. The first matching record wins; later duplicates are ignored.
/// Stored values longer than [`tofu_core::MAX_FINGERPRINT_LEN`] are cut to
/// the limit and logged.
pub fn lookup_fingerprint(path: &Path, key: &HostKey) -> Result<Option<Fingerprint>> {
    lookup_stored(path, key).map(|found| found.map(StoredFingerprint::into_fingerprint))
}

/// Like [`lookup_fingerprint`], keeping whether the stored value was cut.
pub fn lookup_stored(path: &Path, key: &HostKey) -> Result<Option<StoredFingerprint>> {
    let Some(mut reader) = open_store(path)? else {
        return Ok(None);
    };

    let mut buf = Vec::new();
    while next_line(&mut reader, &mut buf, path)? {
        if let Some(value) = line::value_after_key(&buf, key.as_str()) {
            let raw = String::from_utf8_lossy(line::trim(value));
            let stored = Fingerprint::from_stored(&raw);
            if stored.truncated {
                warn!(
                    path = %path.display(),
                    host = %key,
                    len = raw.chars().count(),
                    "stored fingerprint exceeds maximum length, truncated"
                );
            }
            debug!(host = %key, fingerprint = %stored.fingerprint, "found stored fingerprint");
            return Ok(Some(stored));
        }
    }

    debug!(host = %key, "no stored fingerprint");
    Ok(None)
}

/// Read every well-formed record in file order.
///
/// Lines that do not start with a valid `hostname:port` key followed by
/// whitespace are skipped. A missing store yields an empty list.
pub fn list_records(path: &Path) -> Result<Vec<StoreRecord>> {
    let Some(mut reader) = open_store(path)? else {
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut lineno = 0usize;
    while next_line(&mut reader, &mut buf, path)? {
        lineno += 1;
        let Some((key, value)) = line::split_record(&buf) else {
            debug!(line = lineno, "skipping line without a fingerprint");
            continue;
        };
        let host = match std::str::from_utf8(key)
            .ok()
            .and_then(|k| k.parse::<HostKey>().ok())
        {
            Some(host) => host,
            None => {
                debug!(line = lineno, "skipping line with malformed host key");
                continue;
            }
        };
        let stored = Fingerprint::from_stored(&String::from_utf8_lossy(line::trim(value)));
        if stored.truncated {
            warn!(
                line = lineno,
                host = %host,
                "stored fingerprint exceeds maximum length, truncated"
            );
        }
        records.push(StoreRecord::new(host, stored.into_fingerprint()));
    }

    Ok(records)
}
