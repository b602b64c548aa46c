//! Operator-facing decision policies.

use clap::ValueEnum;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Select};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use tofu::{
    AcceptOnce, AlwaysReject, AlwaysTrust, DecisionPolicy, Fingerprint, FirstUse, HostKey,
    MismatchReason, TrustDecision,
};

/// How `tofu check` decides about unknown or changed hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Prompt on the terminal; reject when nobody is there to answer
    #[default]
    Ask,
    /// Trust and record new hosts, reject changed fingerprints
    FirstUse,
    /// Trust and record every host
    Trust,
    /// Accept for this run only, never record
    Once,
    /// Reject anything not already trusted
    Reject,
}

impl PolicyKind {
    /// Build the policy this kind stands for.
    pub fn into_policy(self) -> Box<dyn DecisionPolicy> {
        match self {
            Self::Ask => Box::new(Prompt),
            Self::FirstUse => Box::new(FirstUse),
            Self::Trust => Box::new(AlwaysTrust),
            Self::Once => Box::new(AcceptOnce),
            Self::Reject => Box::new(AlwaysReject),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| {
            anyhow::anyhow!(
                "Unknown policy: {}\n\
                 Valid policies: ask, first-use, trust, once, reject",
                s
            )
        })
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ask => write!(f, "ask"),
            Self::FirstUse => write!(f, "first-use"),
            Self::Trust => write!(f, "trust"),
            Self::Once => write!(f, "once"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Ask the operator on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prompt;

impl DecisionPolicy for Prompt {
    fn decide(
        &self,
        host: &HostKey,
        fingerprint: &Fingerprint,
        reason: MismatchReason,
    ) -> TrustDecision {
        if !console::user_attended_stderr() {
            warn!(host = %host, "no terminal to prompt on, rejecting");
            return TrustDecision::Reject;
        }

        print_banner(host, fingerprint, reason);

        let items = ["Trust and remember", "Accept this time only", "Reject"];
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("How should {host} be treated?"))
            .items(&items)
            .default(2)
            .interact_opt();

        match choice {
            Ok(Some(0)) => TrustDecision::TrustAndPersist,
            Ok(Some(1)) => TrustDecision::AcceptOnce,
            Ok(_) => TrustDecision::Reject,
            Err(e) => {
                warn!(host = %host, error = %e, "prompt failed, rejecting");
                TrustDecision::Reject
            }
        }
    }
}

fn print_banner(host: &HostKey, fingerprint: &Fingerprint, reason: MismatchReason) {
    eprintln!();
    match reason {
        MismatchReason::Unrecognized => {
            eprintln!(
                "{} {} is not in the known-hosts store.",
                "Unknown host:".yellow().bold(),
                host.to_string().cyan()
            );
        }
        MismatchReason::Mismatch => {
            eprintln!("{}", "WARNING: HOST IDENTIFICATION HAS CHANGED".red().bold());
            eprintln!(
                "The certificate presented by {} does not match the trusted one.",
                host.to_string().cyan()
            );
            eprintln!(
                "Someone could be intercepting the connection, or the certificate was rotated."
            );
        }
    }
    eprintln!("  {} {}", "Fingerprint:".bold(), fingerprint);
    eprintln!();
}
