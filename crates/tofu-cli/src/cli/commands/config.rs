//! `tofu config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::output::OutputFormat;

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(config)?);
        }
        _ => {
            let unset = || "(not set)".dimmed().to_string();

            println!("{}", "Current Configuration:".bold());
            println!();
            println!(
                "  {} {}",
                "store_path:".bold(),
                config.store_path.clone().unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "policy:".bold(),
                config.policy.map_or_else(unset, |p| p.to_string())
            );
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or_default()
            );
            println!();
            println!("  {} {}", "effective store:".bold(), ctx.store.path().display());
        }
    }

    Ok(())
}

fn set_config(ctx: Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config;

    match key {
        "store_path" | "store" => {
            config.store_path = Some(value.to_string());
            // Fail now rather than on the next run
            config.expanded_store_path()?;
            println!("{} store_path set to {}.", "Success:".green().bold(), value.cyan());
        }
        "policy" => {
            config.policy = Some(value.parse()?);
            println!("{} policy set to {}.", "Success:".green().bold(), value.cyan());
        }
        "output_format" | "output" => {
            config.output_format = Some(value.parse()?);
            println!("{} Output format set to {}.", "Success:".green().bold(), value.cyan());
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 store_path     - Known-hosts store to use (~ and $VAR are expanded)\n  \
                 policy         - Default check policy (ask/first-use/trust/once/reject)\n  \
                 output_format  - Default output format (pretty/json/csv/yaml)",
                key
            );
        }
    }

    config.save(&ctx.config_path)?;

    Ok(())
}
