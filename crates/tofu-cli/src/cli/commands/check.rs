//! `tofu check` - Verify a fingerprint against the store.

use anyhow::{Context as _, Result};
use colored::Colorize;

use tofu::{MismatchReason, TrustDecision, VerificationReport, VerifyConfig};

use super::{emit, Context};
use crate::cli::args::CheckArgs;
use crate::education::Explain;

pub fn execute(ctx: &Context, args: CheckArgs) -> Result<()> {
    let kind = args.policy.or(ctx.config.policy).unwrap_or_default();

    if ctx.explain {
        Explain::check(kind).print();
    }

    let config = VerifyConfig::new()
        .known_hosts_file(ctx.store.path())
        .boxed_policy(kind.into_policy());

    let report = tofu::verify(
        &args.endpoint.host,
        args.endpoint.port,
        &args.fingerprint,
        &config,
    )
    .with_context(|| {
        format!(
            "Failed to verify {}:{}",
            args.endpoint.host, args.endpoint.port
        )
    })?;

    if !emit(ctx.output_format.render_one(&report)?) {
        print_report(&report);
    }

    if !report.outcome.is_accepted() {
        anyhow::bail!("{} was rejected", report.host);
    }

    Ok(())
}

fn print_report(report: &VerificationReport) {
    let host = report.host.to_string();

    if report.is_match() {
        println!("{} {} matches the trusted fingerprint", "✓".green().bold(), host.cyan());
        return;
    }

    let why = match report.reason {
        Some(MismatchReason::Mismatch) => "fingerprint changed",
        _ => "unknown host",
    };

    match report.decision {
        Some(TrustDecision::TrustAndPersist) => println!(
            "{} {} trusted and recorded ({})",
            "✓".green().bold(),
            host.cyan(),
            why
        ),
        Some(TrustDecision::AcceptOnce) => println!(
            "{} {} accepted for this run only ({})",
            "!".yellow().bold(),
            host.cyan(),
            why
        ),
        _ => println!("{} {} rejected ({})", "✗".red().bold(), host.cyan(), why),
    }
}
