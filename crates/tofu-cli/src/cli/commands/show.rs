//! `tofu show` - Print the trusted fingerprint of a host.

use anyhow::{Context as _, Result};
use colored::Colorize;

use tofu::StoreRecord;

use super::{emit, Context};
use crate::cli::args::HostArgs;
use crate::education::Explain;

pub fn execute(ctx: &Context, args: &HostArgs) -> Result<()> {
    let key = args.key()?;

    if ctx.explain {
        Explain::show(&key).print();
    }

    let fingerprint = ctx
        .store
        .lookup(&key)
        .with_context(|| format!("Failed to read {}", ctx.store.path().display()))?;

    let Some(fingerprint) = fingerprint else {
        anyhow::bail!("{key} is not in {}", ctx.store.path().display());
    };

    let record = StoreRecord::new(key, fingerprint);
    if !emit(ctx.output_format.render_one(&record)?) {
        println!("{} {}", "Host:".bold(), record.host.to_string().cyan());
        println!("  {} {}", "Fingerprint:".bold(), record.fingerprint);
    }

    Ok(())
}
