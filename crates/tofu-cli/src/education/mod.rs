//! Educational features: what each command does to the store.

use colored::Colorize;

use tofu::HostKey;

use crate::interactive::PolicyKind;

/// Command explanation builder.
pub struct Explain {
    title: String,
    description: String,
    touches: Option<String>,
    what_happens: Vec<String>,
    tip: Option<String>,
}

impl Explain {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            touches: None,
            what_happens: Vec::new(),
            tip: None,
        }
    }

    fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    fn touches(mut self, effect: &str) -> Self {
        self.touches = Some(effect.to_string());
        self
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn tip(mut self, tip: &str) -> Self {
        self.tip = Some(tip.to_string());
        self
    }

    /// Print the explanation to stderr, keeping stdout for command output.
    pub fn print(&self) {
        eprintln!();
        eprintln!("{}", format!("=== {} ===", self.title).bold().cyan());
        eprintln!("{}", self.description);
        eprintln!();

        if !self.what_happens.is_empty() {
            eprintln!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, step);
            }
            eprintln!();
        }

        if let Some(touches) = &self.touches {
            eprintln!("{} {}", "Store access:".bold(), touches.dimmed());
        }

        if let Some(tip) = &self.tip {
            eprintln!("{} {}", "Tip:".bold(), tip);
        }

        eprintln!();
        eprintln!("{}", "=== Results ===".bold().cyan());
        eprintln!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn check(policy: PolicyKind) -> Self {
        let decide = match policy {
            PolicyKind::Ask => "Asks you whether to trust, accept once, or reject",
            PolicyKind::FirstUse => "Trusts a host seen for the first time, rejects a changed one",
            PolicyKind::Trust => "Trusts the new fingerprint and records it",
            PolicyKind::Once => "Accepts the host for this run without recording it",
            PolicyKind::Reject => "Rejects the host",
        };

        Self::new("Check")
            .description(
                "Verifies a fingerprint the way a TOFU client does before connecting.",
            )
            .touches("read; written only when the host is trusted")
            .step("Looks up the first record for host:port in the store")
            .step("A matching fingerprint is accepted straight away")
            .step(&format!("Otherwise ({policy} policy): {decide}"))
            .step("A trusted host is written to the store before it is reported accepted")
            .tip("Exit status is non-zero when the host is rejected, so scripts can rely on it")
    }

    pub fn show(host: &HostKey) -> Self {
        Self::new("Show")
            .description(&format!("Prints the fingerprint trusted for {host}."))
            .touches("read only")
            .step("Scans the store line by line")
            .step("The first line whose key is exactly host:port wins")
    }

    pub fn list() -> Self {
        Self::new("List")
            .description("Lists every well-formed record in the store, in file order.")
            .touches("read only")
            .step("Lines without a fingerprint are skipped")
            .tip("Use -o json or -o csv to feed the list to other tools")
    }

    pub fn trust(host: &HostKey) -> Self {
        Self::new("Trust")
            .description(&format!(
                "Records a fingerprint for {host} without checking the current one."
            ))
            .touches("rewritten atomically")
            .step("Copies every other record into a temporary file next to the store")
            .step("Appends the new record and flushes it to disk")
            .step("Renames the temporary file over the store")
            .tip("Only do this with a fingerprint you obtained out of band")
    }

    pub fn forget(host: &HostKey) -> Self {
        Self::new("Forget")
            .description(&format!("Removes every record for {host}."))
            .touches("rewritten atomically")
            .step("Copies every other record into a temporary file next to the store")
            .step("Renames the temporary file over the store")
            .tip("The next check for this host will treat it as unknown")
    }

    pub fn path() -> Self {
        Self::new("Path")
            .description("Prints where the known-hosts store lives.")
            .step("--store or TOFU_KNOWN_HOSTS wins")
            .step("Then store_path from the config file")
            .step("Otherwise known_certs in the per-user state directory")
    }
}
