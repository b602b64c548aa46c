//! Known-hosts store for trust-on-first-use fingerprint verification.
//!
//! The store is a plain text file with one `hostname:port fingerprint` record
//! per line. This crate resolves where it lives, reads records from it, and
//! rewrites it atomically:
//!
//! - [`locator`] - default and explicit store paths
//! - [`lookup`] - lock-free record lookup and listing
//! - [`writer`] - crash-safe add, replace and remove
//!
//! [`KnownHosts`] bundles all three behind a path handle.

#![doc(html_root_url = "https://docs.rs/tofu-store/0.1.0")]

mod line;
pub mod locator;
pub mod lookup;
mod store;
pub mod writer;

pub use locator::{default_store_path, resolve_store_path, KNOWN_HOSTS_FILE};
pub use lookup::{list_records, lookup_fingerprint, lookup_stored};
pub use store::{KnownHosts, TrustStore};
pub use tofu_core::{Result, TofuError};
pub use writer::{remove_record, write_record};
