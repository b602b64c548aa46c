//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::interactive::PolicyKind;
use crate::output::OutputFormat;

/// Trust-on-first-use known-hosts tool
///
/// Check server certificate fingerprints against a known-hosts store and
/// manage the trusted records in it. Use --explain on any command to learn
/// what it does.
#[derive(Parser, Debug)]
#[command(name = "tofu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Known-hosts store to use instead of the default
    #[arg(short, long, env = "TOFU_KNOWN_HOSTS", global = true)]
    pub store: Option<PathBuf>,

    /// Configuration file to use instead of the default
    #[arg(long, env = "TOFU_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify a fingerprint, asking what to do if the host is unknown or changed
    Check(CheckArgs),

    /// Show the trusted fingerprint of a host
    Show(HostArgs),

    /// List every trusted host
    List,

    /// Trust a fingerprint for a host, replacing any previous one
    Trust(TrustArgs),

    /// Remove a host from the store
    Forget(HostArgs),

    /// Print the path of the known-hosts store
    Path,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

/// Endpoint whose record is addressed.
#[derive(Args, Debug)]
pub struct HostArgs {
    /// Server hostname (e.g., db.example.com)
    pub host: String,

    /// Server port
    pub port: u16,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub endpoint: HostArgs,

    /// Fingerprint presented by the server
    pub fingerprint: String,

    /// What to do with unknown or changed hosts [default: ask]
    #[arg(short, long, value_enum)]
    pub policy: Option<PolicyKind>,
}

#[derive(Args, Debug)]
pub struct TrustArgs {
    #[command(flatten)]
    pub endpoint: HostArgs,

    /// Fingerprint to trust
    pub fingerprint: String,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (store_path, policy, output_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
