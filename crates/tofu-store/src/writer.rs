//! Crash-safe rewrites of a known-hosts store.
//!
//! Every update copies the current store into a temporary file in the same
//! directory, applies the change there, syncs it, and renames it over the
//! store. Concurrent readers see either the old file or the new one. If any
//! step fails the temporary file is removed when its guard drops and the
//! store is left untouched.
//!
//! Writers do not lock. Two processes updating the same store race and the
//! last rename wins.

use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use tofu_core::{HostKey, Result, StoreRecord, TofuError};

use crate::line;
use crate::lookup::{next_line, open_store};

/// Outcome of copying the unaffected records into the temporary file.
#[derive(Debug, Default)]
struct Copied {
    kept: usize,
    dropped: usize,
    ends_with_newline: bool,
}

/// Add or replace the record for `record.host`.
///
/// All other lines are preserved verbatim and in order. Every existing line
/// for the same host is dropped, so the store holds exactly one record for it
/// afterwards.
pub fn write_record(path: &Path, record: &StoreRecord) -> Result<()> {
    rewrite(path, &record.host, Some(record), persist)?;
    info!(path = %path.display(), host = %record.host, "stored fingerprint");
    Ok(())
}

/// Remove every record for `key`.
///
/// Returns false without touching the filesystem when the store does not
/// exist or holds no record for the key.
pub fn remove_record(path: &Path, key: &HostKey) -> Result<bool> {
    let dropped = rewrite(path, key, None, persist)?;
    if dropped > 0 {
        info!(path = %path.display(), host = %key, dropped, "removed fingerprint");
    }
    Ok(dropped > 0)
}

/// Rename the finished temporary file over the store.
fn persist(tmp: NamedTempFile, path: &Path) -> io::Result<()> {
    tmp.persist(path).map(drop).map_err(|e| e.error)
}

/// Copy `path` minus the records for `key` into a sibling temporary file,
/// append `replacement` if given, then hand the file to `commit`.
///
/// Returns how many records for `key` were dropped. With no replacement and
/// nothing to drop, `commit` is never called.
fn rewrite<C>(
    path: &Path,
    key: &HostKey,
    replacement: Option<&StoreRecord>,
    commit: C,
) -> Result<usize>
where
    C: FnOnce(NamedTempFile, &Path) -> io::Result<()>,
{
    let input = open_store(path)?;
    if input.is_none() && replacement.is_none() {
        return Ok(0);
    }

    let dir = parent_dir(path);
    if let Err(e) = fs::create_dir_all(dir) {
        error!(dir = %dir.display(), error = %e, "failed to create store directory");
        return Err(TofuError::io(dir, e));
    }

    let mut tmp = create_temp(path, dir)?;
    let tmp_path = tmp.path().to_path_buf();
    debug!(tmp = %tmp_path.display(), "writing temporary store");

    let copied = {
        let mut out = BufWriter::new(tmp.as_file_mut());
        let copied = match input {
            Some(mut reader) => copy_except(&mut reader, path, key, &mut out, &tmp_path)?,
            None => Copied::default(),
        };

        if let Some(record) = replacement {
            if copied.kept > 0 && !copied.ends_with_newline {
                out.write_all(b"\n").map_err(|e| write_failed(&tmp_path, e))?;
            }
            out.write_all(record.to_line().as_bytes())
                .map_err(|e| write_failed(&tmp_path, e))?;
        }
        out.flush().map_err(|e| write_failed(&tmp_path, e))?;
        copied
    };

    if replacement.is_none() && copied.dropped == 0 {
        debug!(host = %key, "no record to remove");
        return Ok(0);
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| write_failed(&tmp_path, e))?;

    if let Err(e) = commit(tmp, path) {
        error!(
            from = %tmp_path.display(),
            to = %path.display(),
            error = %e,
            "rename failed"
        );
        return Err(TofuError::io(path, e));
    }

    sync_dir(dir);
    Ok(copied.dropped)
}

/// Copy every line not keyed by `key` from `reader` to `out`.
fn copy_except<R: BufRead, W: Write>(
    reader: &mut R,
    src: &Path,
    key: &HostKey,
    out: &mut W,
    tmp_path: &Path,
) -> Result<Copied> {
    let mut copied = Copied::default();
    let mut buf = Vec::new();
    while next_line(reader, &mut buf, src)? {
        if line::value_after_key(&buf, key.as_str()).is_some() {
            copied.dropped += 1;
            continue;
        }
        out.write_all(&buf).map_err(|e| write_failed(tmp_path, e))?;
        copied.kept += 1;
        copied.ends_with_newline = buf.ends_with(b"\n");
    }
    Ok(copied)
}

fn create_temp(path: &Path, dir: &Path) -> Result<NamedTempFile> {
    let name = path
        .file_name()
        .map_or_else(|| "known_certs".into(), |n| n.to_string_lossy());
    let prefix = format!(".{name}.");
    tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            error!(dir = %dir.display(), error = %e, "failed to create temp file");
            TofuError::io(dir, e)
        })
}

fn write_failed(tmp_path: &Path, e: io::Error) -> TofuError {
    error!(tmp = %tmp_path.display(), error = %e, "write failed");
    TofuError::io(tmp_path, e)
}

/// Directory holding the store; `.` for a bare file name.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Make the rename itself durable. The store is already replaced, so a
/// failure here is only logged.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(e) = fs::File::open(dir).and_then(|d| d.sync_all()) {
        warn!(dir = %dir.display(), error = %e, "failed to sync store directory");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
