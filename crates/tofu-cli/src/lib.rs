//! # tofu-cli
//!
//! Command-line tool for trust-on-first-use known-hosts stores.
//!
//! ## Features
//!
//! - **Verification**: run the trust decision for a host and fingerprint,
//!   prompting the operator when the host is unknown or has changed
//! - **Store management**: show, list, trust and forget records
//! - **Educational mode**: `--explain` describes what a command does
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod interactive;
pub mod logging;
pub mod output;

pub use cli::run;
