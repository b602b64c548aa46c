use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for trust-store operations
pub type Result<T> = std::result::Result<T, TofuError>;

/// Errors that can occur while verifying or updating a known-hosts store
#[derive(Error, Debug)]
pub enum TofuError {
    /// Caller supplied an invalid hostname or fingerprint
    #[error("invalid {field}: {reason}")]
    Usage {
        /// Which input was rejected
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Opening, reading, creating, writing or renaming a store file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation was working on
        path: PathBuf,
        /// Underlying platform error
        #[source]
        source: std::io::Error,
    },

    /// The default store path could not be constructed
    #[error("cannot determine known-hosts path: {0}")]
    Path(String),
}

impl TofuError {
    /// Build a usage error for the named input.
    pub fn usage(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Usage {
            field,
            reason: reason.into(),
        }
    }

    /// Attach a path to an I/O error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns true if the caller passed invalid input
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }

    /// Returns true if the error came from the filesystem
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns the underlying I/O error kind, if any
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}
