//! `tofu trust` - Record a fingerprint for a host.

use anyhow::{Context as _, Result};
use colored::Colorize;
use tracing::info;

use tofu::StoreRecord;

use super::{emit, parse_fingerprint, Context};
use crate::cli::args::TrustArgs;
use crate::education::Explain;

pub fn execute(ctx: &Context, args: &TrustArgs) -> Result<()> {
    let key = args.endpoint.key()?;
    let fingerprint = parse_fingerprint(&args.fingerprint)?;

    if ctx.explain {
        Explain::trust(&key).print();
    }

    ctx.store
        .trust(&key, &fingerprint)
        .with_context(|| format!("Failed to update {}", ctx.store.path().display()))?;
    info!(host = %key, "recorded fingerprint");

    let record = StoreRecord::new(key, fingerprint);
    if !emit(ctx.output_format.render_one(&record)?) {
        println!(
            "{} {} is now trusted with {}",
            "Success:".green().bold(),
            record.host.to_string().cyan(),
            record.fingerprint
        );
    }

    Ok(())
}
