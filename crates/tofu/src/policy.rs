//! Decision policies for hosts that fail verification.

use tofu_core::{Fingerprint, HostKey, MismatchReason, TrustDecision};

/// Decides what to do with a host whose fingerprint is unknown or changed.
///
/// Called synchronously on the verifying thread and may block, for example
/// while prompting a user. Any state the policy needs lives in the
/// implementor.
pub trait DecisionPolicy {
    /// Decide for `host`, which presented `fingerprint` and failed for `reason`
    fn decide(
        &self,
        host: &HostKey,
        fingerprint: &Fingerprint,
        reason: MismatchReason,
    ) -> TrustDecision;
}

impl<F> DecisionPolicy for F
where
    F: Fn(&HostKey, &Fingerprint, MismatchReason) -> TrustDecision,
{
    fn decide(
        &self,
        host: &HostKey,
        fingerprint: &Fingerprint,
        reason: MismatchReason,
    ) -> TrustDecision {
        self(host, fingerprint, reason)
    }
}

/// Trust and record every host, changed fingerprints included
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysTrust;

impl DecisionPolicy for AlwaysTrust {
    fn decide(&self, _: &HostKey, _: &Fingerprint, _: MismatchReason) -> TrustDecision {
        TrustDecision::TrustAndPersist
    }
}

/// Accept every host for this connection without recording it
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptOnce;

impl DecisionPolicy for AcceptOnce {
    fn decide(&self, _: &HostKey, _: &Fingerprint, _: MismatchReason) -> TrustDecision {
        TrustDecision::AcceptOnce
    }
}

/// Reject every host that is not already trusted
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReject;

impl DecisionPolicy for AlwaysReject {
    fn decide(&self, _: &HostKey, _: &Fingerprint, _: MismatchReason) -> TrustDecision {
        TrustDecision::Reject
    }
}

/// Classic TOFU: record hosts seen for the first time, reject changed ones
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUse;

impl DecisionPolicy for FirstUse {
    fn decide(&self, _: &HostKey, _: &Fingerprint, reason: MismatchReason) -> TrustDecision {
        match reason {
            MismatchReason::Unrecognized => TrustDecision::TrustAndPersist,
            MismatchReason::Mismatch => TrustDecision::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> (HostKey, Fingerprint) {
        (
            HostKey::new("a.com", 80).unwrap(),
            Fingerprint::new("AA").unwrap(),
        )
    }

    #[test]
    fn fixed_policies() {
        let (host, fp) = args();
        for reason in [MismatchReason::Unrecognized, MismatchReason::Mismatch] {
            assert_eq!(AlwaysTrust.decide(&host, &fp, reason), TrustDecision::TrustAndPersist);
            assert_eq!(AcceptOnce.decide(&host, &fp, reason), TrustDecision::AcceptOnce);
            assert_eq!(AlwaysReject.decide(&host, &fp, reason), TrustDecision::Reject);
        }
    }

    #[test]
    fn first_use_only_trusts_unknown_hosts() {
        let (host, fp) = args();
        assert_eq!(
            FirstUse.decide(&host, &fp, MismatchReason::Unrecognized),
            TrustDecision::TrustAndPersist
        );
        assert_eq!(
            FirstUse.decide(&host, &fp, MismatchReason::Mismatch),
            TrustDecision::Reject
        );
    }

    #[test]
    fn closures_are_policies() {
        let (host, fp) = args();
        let policy = |h: &HostKey, _: &Fingerprint, _: MismatchReason| {
            if h.port() == 80 {
                TrustDecision::AcceptOnce
            } else {
                TrustDecision::Reject
            }
        };
        assert_eq!(
            policy.decide(&host, &fp, MismatchReason::Mismatch),
            TrustDecision::AcceptOnce
        );
    }
}
