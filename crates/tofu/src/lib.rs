//! Trust-on-first-use verification of server certificate fingerprints.
//!
//! A client that has already obtained a server's certificate fingerprint
//! checks it against a known-hosts store, much like SSH's `known_hosts`. A
//! matching fingerprint is accepted. An unknown or changed fingerprint is
//! handed to a [`DecisionPolicy`], which can trust and record it, accept it
//! for one connection, or reject it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tofu::{check_known_hosts, FirstUse, VerificationOutcome, VerifyConfig};
//!
//! fn main() -> tofu::Result<()> {
//!     let config = VerifyConfig::new()
//!         .known_hosts_file("/var/lib/myapp/known_certs")
//!         .policy(FirstUse);
//!
//!     let fingerprint = "5e:7a:1b:9c:0d:3f:22:41:88:aa:c3:f0:12:6d:e4:b7:90:3a:5c:11";
//!     match check_known_hosts("db.example.com", 7687, fingerprint, &config)? {
//!         VerificationOutcome::Accepted => println!("connecting"),
//!         VerificationOutcome::Rejected => println!("refusing untrusted host"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Store format
//!
//! One record per line, `hostname:port fingerprint`. Updates are written to a
//! temporary file next to the store and renamed over it, so readers and
//! crashes never see a half-written store. Concurrent writers are not
//! coordinated; the last one to rename wins.

#![doc(html_root_url = "https://docs.rs/tofu/0.1.0")]

mod config;
pub mod policy;
mod verify;

pub use config::VerifyConfig;
pub use policy::{AcceptOnce, AlwaysReject, AlwaysTrust, DecisionPolicy, FirstUse};
pub use verify::{check_known_hosts, verify, verify_with_store};

// Re-export core types
pub use tofu_core::*;

// Re-export the store
pub use tofu_store::{self as store, KnownHosts, TrustStore};
