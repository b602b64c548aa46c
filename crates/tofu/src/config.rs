//! Verification configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::policy::DecisionPolicy;

/// Inputs the verification engine takes from its caller.
///
/// Without a store override the per-user default store is used. Without a
/// policy every unknown or changed host is rejected.
#[derive(Default)]
pub struct VerifyConfig {
    known_hosts_file: Option<PathBuf>,
    policy: Option<Box<dyn DecisionPolicy>>,
}

impl VerifyConfig {
    /// Default store, no policy
    #[must_use]
    pub const fn new() -> Self {
        Self {
            known_hosts_file: None,
            policy: None,
        }
    }

    /// Use the store at `path` instead of the per-user default
    #[must_use]
    pub fn known_hosts_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_file = Some(path.into());
        self
    }

    /// Consult `policy` for unknown or changed hosts
    #[must_use]
    pub fn policy(mut self, policy: impl DecisionPolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Consult an already boxed policy, for policies chosen at runtime
    #[must_use]
    pub fn boxed_policy(mut self, policy: Box<dyn DecisionPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Remove any configured policy
    #[must_use]
    pub fn without_policy(mut self) -> Self {
        self.policy = None;
        self
    }

    /// Explicit store path, if one was configured
    #[must_use]
    pub fn known_hosts_path(&self) -> Option<&Path> {
        self.known_hosts_file.as_deref()
    }

    /// The configured policy, if any
    #[must_use]
    pub fn decision_policy(&self) -> Option<&dyn DecisionPolicy> {
        self.policy.as_deref()
    }
}

impl fmt::Debug for VerifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyConfig")
            .field("known_hosts_file", &self.known_hosts_file)
            .field("policy", &self.policy.as_ref().map(|_| "<policy>"))
            .finish()
    }
}
