//! Command implementations.

pub mod check;
pub mod config;
pub mod forget;
pub mod list;
pub mod path;
pub mod show;
pub mod trust;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use tofu::{Fingerprint, HostKey, KnownHosts};

use super::args::HostArgs;
use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Known-hosts store the command works on
    pub store: KnownHosts,

    /// Loaded configuration
    pub config: Config,

    /// Where the configuration was loaded from
    pub config_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show educational explanations
    pub explain: bool,

    /// Verbose output
    pub verbose: bool,
}

impl HostArgs {
    /// Validate into a store key.
    pub fn key(&self) -> Result<HostKey> {
        HostKey::new(&self.host, self.port)
            .with_context(|| format!("Invalid host: {}", self.host))
    }
}

/// Validate a fingerprint given on the command line.
pub fn parse_fingerprint(raw: &str) -> Result<Fingerprint> {
    Fingerprint::new(raw).with_context(|| format!("Invalid fingerprint: {raw}"))
}

/// Print a machine-readable rendering, if the format has one.
///
/// Returns false for pretty output, which the caller prints itself.
pub fn emit(rendered: Option<String>) -> bool {
    let Some(out) = rendered else {
        return false;
    };
    print!("{out}");
    true
}
