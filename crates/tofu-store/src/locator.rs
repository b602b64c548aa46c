//! Resolution of the known-hosts store path.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use tofu_core::{Result, TofuError};

/// File name of the store inside the per-user state directory.
pub const KNOWN_HOSTS_FILE: &str = "known_certs";

/// Longest path, in bytes, the platform accepts for the default store.
#[cfg(windows)]
pub const MAX_PATH_LEN: usize = 260;

/// Longest path, in bytes, the platform accepts for the default store.
#[cfg(not(windows))]
pub const MAX_PATH_LEN: usize = 4096;

/// Return the explicit path if one is configured, the default path otherwise.
///
/// Performs no I/O.
pub fn resolve_store_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_store_path(),
    }
}

/// Default store path: `known_certs` in the per-user state directory.
///
/// Uses the platform state directory where one exists (`$XDG_STATE_HOME` on
/// Linux) and the local data directory elsewhere.
pub fn default_store_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "tofu").ok_or_else(|| {
        TofuError::Path("could not determine the user's home directory".to_string())
    })?;

    let base = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    store_path_in(base)
}

/// Store path inside `base`, checked against [`MAX_PATH_LEN`].
pub fn store_path_in(base: &Path) -> Result<PathBuf> {
    let path = base.join(KNOWN_HOSTS_FILE);
    let len = path.as_os_str().len();
    if len >= MAX_PATH_LEN {
        return Err(TofuError::Path(format!(
            "{len}-byte path exceeds the platform limit of {MAX_PATH_LEN}"
        )));
    }
    Ok(path)
}
