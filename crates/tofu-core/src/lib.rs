//! Core types and errors for trust-on-first-use host verification.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - **Types**: [`HostKey`], [`Fingerprint`], [`StoreRecord`] and the
//!   decision/outcome enums exchanged with decision policies
//! - **Errors**: [`TofuError`] with usage, I/O and path variants
//!
//! # Example
//!
//! ```rust
//! use tofu_core::{Fingerprint, HostKey, StoreRecord};
//!
//! let record = StoreRecord::new(
//!     HostKey::new("db.example.com", 7687).unwrap(),
//!     Fingerprint::new("11:22:33").unwrap(),
//! );
//! assert_eq!(record.to_line(), "db.example.com:7687 11:22:33\n");
//! ```

mod error;
pub mod types;

pub use error::{Result, TofuError};
pub use types::*;
