//! `tofu list` - List every trusted host.

use anyhow::{Context as _, Result};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use super::{emit, Context};
use crate::education::Explain;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Host")]
    hostname: String,
    #[tabled(rename = "Port")]
    port: u16,
    #[tabled(rename = "Fingerprint")]
    fingerprint: String,
}

pub fn execute(ctx: &Context) -> Result<()> {
    if ctx.explain {
        Explain::list().print();
    }

    let records = ctx
        .store
        .records()
        .with_context(|| format!("Failed to read {}", ctx.store.path().display()))?;

    if emit(ctx.output_format.render_many(&records)?) {
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "No trusted hosts.".dimmed());
        return Ok(());
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow {
            hostname: r.host.hostname().to_string(),
            port: r.host.port(),
            fingerprint: r.fingerprint.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    println!();
    println!("{} {} trusted host(s)", "Total:".bold(), records.len());

    Ok(())
}
