//! tofu - trust-on-first-use known-hosts tool
//!
//! Inspect, verify and edit the fingerprint store used by TOFU clients.

use anyhow::Result;

fn main() -> Result<()> {
    tofu_cli::run()
}
