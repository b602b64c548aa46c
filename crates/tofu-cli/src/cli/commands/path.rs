//! `tofu path` - Print the resolved store location.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::education::Explain;

pub fn execute(ctx: &Context) -> Result<()> {
    if ctx.explain {
        Explain::path().print();
    }

    println!("{}", ctx.store.path().display());

    if ctx.verbose && !ctx.store.exists() {
        eprintln!("{}", "(file does not exist yet)".dimmed());
    }

    Ok(())
}
