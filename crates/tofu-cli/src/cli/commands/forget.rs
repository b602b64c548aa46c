//! `tofu forget` - Remove a host from the store.

use anyhow::{Context as _, Result};
use colored::Colorize;
use tracing::warn;

use super::Context;
use crate::cli::args::HostArgs;
use crate::education::Explain;

pub fn execute(ctx: &Context, args: &HostArgs) -> Result<()> {
    let key = args.key()?;

    if ctx.explain {
        Explain::forget(&key).print();
    }

    let removed = ctx
        .store
        .forget(&key)
        .with_context(|| format!("Failed to update {}", ctx.store.path().display()))?;

    if removed {
        println!("{} {} removed.", "Success:".green().bold(), key.to_string().cyan());
    } else {
        warn!(host = %key, "no record to remove");
        println!("{} {} was not in the store.", "Note:".yellow().bold(), key);
    }

    Ok(())
}
