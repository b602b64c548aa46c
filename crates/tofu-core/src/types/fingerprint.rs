use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TofuError};

/// Maximum length of a fingerprint, in characters.
///
/// Applies to both observed fingerprints and those read back from a store.
pub const MAX_FINGERPRINT_LEN: usize = 59;

/// Opaque certificate fingerprint, compared as a plain token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Validate an observed fingerprint.
    ///
    /// Rejects empty values, values longer than [`MAX_FINGERPRINT_LEN`]
    /// characters and values containing whitespace or control characters.
    pub fn new(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(TofuError::usage("fingerprint", "must not be empty"));
        }
        let len = value.chars().count();
        if len > MAX_FINGERPRINT_LEN {
            return Err(TofuError::usage(
                "fingerprint",
                format!("{len} characters exceeds the limit of {MAX_FINGERPRINT_LEN}"),
            ));
        }
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TofuError::usage(
                "fingerprint",
                "must not contain whitespace or control characters",
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Wrap a value read from a store, capping it at [`MAX_FINGERPRINT_LEN`].
    ///
    /// Stored values are not validated beyond the length cap.
    #[must_use]
    pub fn from_stored(value: &str) -> StoredFingerprint {
        match value.char_indices().nth(MAX_FINGERPRINT_LEN) {
            Some((cut, _)) => StoredFingerprint {
                fingerprint: Self(value[..cut].to_string()),
                truncated: true,
            },
            None => Self(value.to_string()).into(),
        }
    }

    /// The fingerprint text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A fingerprint as read back from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFingerprint {
    /// Stored value, cut to [`MAX_FINGERPRINT_LEN`] characters
    pub fingerprint: Fingerprint,
    /// Whether the value on disk was longer than the cap
    pub truncated: bool,
}

impl StoredFingerprint {
    /// Whether `observed` is the fingerprint that was stored.
    ///
    /// A truncated value never matches: its tail is unknown.
    #[must_use]
    pub fn matches(&self, observed: &Fingerprint) -> bool {
        !self.truncated && self.fingerprint == *observed
    }

    /// The (possibly truncated) fingerprint
    #[must_use]
    pub fn into_fingerprint(self) -> Fingerprint {
        self.fingerprint
    }
}

impl From<Fingerprint> for StoredFingerprint {
    fn from(fingerprint: Fingerprint) -> Self {
        Self {
            fingerprint,
            truncated: false,
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = TofuError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Fingerprint {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Fingerprint {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
