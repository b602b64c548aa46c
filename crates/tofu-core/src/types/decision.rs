use serde::{Deserialize, Serialize};
use std::fmt;

use super::HostKey;

/// Final answer of a host verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationOutcome {
    /// The host may be connected to
    Accepted,
    /// The connection must be refused
    Rejected,
}

impl VerificationOutcome {
    /// Returns true if the host was accepted
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Why a host could not be verified against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchReason {
    /// No record exists for the host
    Unrecognized,
    /// A record exists but holds a different fingerprint
    Mismatch,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized => write!(f, "unrecognized"),
            Self::Mismatch => write!(f, "mismatch"),
        }
    }
}

/// Answer of a decision policy for an unverified host.
///
/// New variants may be added; consumers treat any variant they do not know
/// as [`TrustDecision::Reject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TrustDecision {
    /// Accept the host and record its fingerprint in the store
    TrustAndPersist,
    /// Accept the host for this connection only
    AcceptOnce,
    /// Refuse the host
    Reject,
}

impl fmt::Display for TrustDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrustAndPersist => write!(f, "trust"),
            Self::AcceptOnce => write!(f, "accept once"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Detailed result of one verification call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Endpoint that was verified
    pub host: HostKey,
    /// Final answer
    pub outcome: VerificationOutcome,
    /// Why the stored fingerprint did not match, if it did not
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<MismatchReason>,
    /// What the policy decided, if it was consulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<TrustDecision>,
    /// Whether the observed fingerprint was written to the store
    #[serde(default)]
    pub persisted: bool,
}

impl VerificationReport {
    /// Report for a host whose stored fingerprint matched
    #[must_use]
    pub const fn matched(host: HostKey) -> Self {
        Self {
            host,
            outcome: VerificationOutcome::Accepted,
            reason: None,
            decision: None,
            persisted: false,
        }
    }

    /// Returns true if the stored fingerprint matched without a policy decision
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.reason.is_none() && self.outcome.is_accepted()
    }
}
