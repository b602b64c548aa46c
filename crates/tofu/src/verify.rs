//! The trust decision engine.
//!
//! A host whose observed fingerprint equals the stored one is accepted
//! without consulting any policy. A stored value that had to be truncated on
//! read never counts as equal. An unknown or changed host is only
//! accepted on an explicit policy decision, and a decision to trust is only
//! reported as accepted once the new record is durably stored.

use tracing::{debug, info, warn};

use tofu_core::{
    Fingerprint, HostKey, MismatchReason, Result, TrustDecision, VerificationOutcome,
    VerificationReport,
};
use tofu_store::{KnownHosts, TrustStore};

use crate::config::VerifyConfig;
use crate::policy::DecisionPolicy;

/// Verify `fingerprint` for `hostname:port` against the configured store.
///
/// Returns [`VerificationOutcome::Accepted`] if the stored fingerprint
/// matches or the policy accepts the host, and
/// [`VerificationOutcome::Rejected`] otherwise.
///
/// # Errors
///
/// - [`TofuError::Usage`](tofu_core::TofuError::Usage) for an empty,
///   over-long or whitespace-containing hostname or fingerprint, before any
///   file is touched
/// - [`TofuError::Path`](tofu_core::TofuError::Path) if the default store
///   path cannot be built
/// - [`TofuError::Io`](tofu_core::TofuError::Io) if the store cannot be read,
///   or if the policy chose to trust the host and the store could not be
///   updated
pub fn check_known_hosts(
    hostname: &str,
    port: u16,
    fingerprint: &str,
    config: &VerifyConfig,
) -> Result<VerificationOutcome> {
    verify(hostname, port, fingerprint, config).map(|report| report.outcome)
}

/// Like [`check_known_hosts`], returning the full [`VerificationReport`].
pub fn verify(
    hostname: &str,
    port: u16,
    fingerprint: &str,
    config: &VerifyConfig,
) -> Result<VerificationReport> {
    let host = HostKey::new(hostname, port)?;
    let observed = Fingerprint::new(fingerprint)?;
    let store = KnownHosts::resolve(config.known_hosts_path())?;

    verify_with_store(&store, &host, &observed, config.decision_policy())
}

/// Run the decision protocol against any [`TrustStore`].
pub fn verify_with_store<S>(
    store: &S,
    host: &HostKey,
    observed: &Fingerprint,
    policy: Option<&dyn DecisionPolicy>,
) -> Result<VerificationReport>
where
    S: TrustStore + ?Sized,
{
    let reason = match store.lookup(host)? {
        Some(stored) if stored.matches(observed) => {
            debug!(host = %host, "fingerprint matches stored record");
            return Ok(VerificationReport::matched(host.clone()));
        }
        Some(stored) => {
            warn!(
                host = %host,
                stored = %stored.fingerprint,
                truncated = stored.truncated,
                observed = %observed,
                "fingerprint does not match stored record"
            );
            MismatchReason::Mismatch
        }
        None => {
            debug!(host = %host, "host not in known-hosts store");
            MismatchReason::Unrecognized
        }
    };

    let mut report = VerificationReport {
        host: host.clone(),
        outcome: VerificationOutcome::Rejected,
        reason: Some(reason),
        decision: None,
        persisted: false,
    };

    let Some(policy) = policy else {
        warn!(host = %host, %reason, "no decision policy configured, rejecting");
        return Ok(report);
    };

    let decision = policy.decide(host, observed, reason);
    report.decision = Some(decision);

    match decision {
        TrustDecision::TrustAndPersist => {
            store.trust(host, observed)?;
            info!(host = %host, fingerprint = %observed, %reason, "trusted and recorded host");
            report.persisted = true;
            report.outcome = VerificationOutcome::Accepted;
        }
        TrustDecision::AcceptOnce => {
            info!(host = %host, %reason, "accepted host for this connection only");
            report.outcome = VerificationOutcome::Accepted;
        }
        TrustDecision::Reject => {
            warn!(host = %host, %reason, "host rejected by decision policy");
        }
        other => {
            warn!(host = %host, decision = ?other, "unknown decision, rejecting");
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{AcceptOnce, AlwaysReject, AlwaysTrust, FirstUse};
    use std::cell::{Cell, RefCell};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tofu_core::{StoredFingerprint, TofuError, MAX_FINGERPRINT_LEN};

    const HOST: &str = "db.example.com";
    const PORT: u16 = 7687;

    fn store_in(dir: &TempDir) -> PathBuf {
        dir.path().join("known_certs")
    }

    fn config(path: &Path) -> VerifyConfig {
        VerifyConfig::new().known_hosts_file(path)
    }

    #[test]
    fn matching_fingerprint_is_accepted_without_policy_call() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);
        fs::write(&path, "db.example.com:7687 AA\n").unwrap();

        let calls = Cell::new(0);
        let policy = |_: &HostKey, _: &Fingerprint, _: MismatchReason| {
            calls.set(calls.get() + 1);
            TrustDecision::Reject
        };
        let store = KnownHosts::at(&path);
        let host = HostKey::new(HOST, PORT).unwrap();
        let fp = Fingerprint::new("AA").unwrap();

        let report = verify_with_store(&store, &host, &fp, Some(&policy)).unwrap();

        assert_eq!(report.outcome, VerificationOutcome::Accepted);
        assert!(report.is_match());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn mismatch_without_policy_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);
        fs::write(&path, "db.example.com:7687 AA\n").unwrap();

        let outcome = check_known_hosts(HOST, PORT, "BB", &config(&path)).unwrap();

        assert_eq!(outcome, VerificationOutcome::Rejected);
        assert_eq!(fs::read_to_string(&path).unwrap(), "db.example.com:7687 AA\n");
    }

    #[test]
    fn unknown_host_without_policy_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);

        let report = verify(HOST, PORT, "11:22:33", &config(&path)).unwrap();

        assert_eq!(report.outcome, VerificationOutcome::Rejected);
        assert_eq!(report.reason, Some(MismatchReason::Unrecognized));
        assert_eq!(report.decision, None);
        assert!(!path.exists());
    }

    #[test]
    fn trust_and_persist_records_the_fingerprint() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);

        let report = verify(HOST, PORT, "11:22:33", &config(&path).policy(AlwaysTrust)).unwrap();

        assert_eq!(report.outcome, VerificationOutcome::Accepted);
        assert_eq!(report.decision, Some(TrustDecision::TrustAndPersist));
        assert!(report.persisted);

        let stored = KnownHosts::at(&path)
            .lookup(&HostKey::new(HOST, PORT).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(stored, "11:22:33");

        // Second connection matches without consulting the policy.
        let outcome = check_known_hosts(HOST, PORT, "11:22:33", &config(&path)).unwrap();
        assert_eq!(outcome, VerificationOutcome::Accepted);
    }

    #[test]
    fn policy_sees_reason_and_observed_fingerprint() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);
        fs::write(&path, "db.example.com:7687 AA\n").unwrap();

        let seen = RefCell::new(Vec::new());
        let policy = |h: &HostKey, fp: &Fingerprint, reason: MismatchReason| {
            seen.borrow_mut().push((h.to_string(), fp.to_string(), reason));
            TrustDecision::TrustAndPersist
        };
        let store = KnownHosts::at(&path);
        let host = HostKey::new(HOST, PORT).unwrap();
        let fp = Fingerprint::new("BB").unwrap();

        let report = verify_with_store(&store, &host, &fp, Some(&policy)).unwrap();

        assert!(report.persisted);
        assert_eq!(
            seen.into_inner(),
            vec![(
                "db.example.com:7687".to_string(),
                "BB".to_string(),
                MismatchReason::Mismatch
            )]
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "db.example.com:7687 BB\n");
    }

    #[test]
    fn accept_once_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);
        fs::write(&path, "db.example.com:7687 AA\n").unwrap();

        let report = verify(HOST, PORT, "BB", &config(&path).policy(AcceptOnce)).unwrap();

        assert_eq!(report.outcome, VerificationOutcome::Accepted);
        assert!(!report.persisted);
        assert_eq!(fs::read_to_string(&path).unwrap(), "db.example.com:7687 AA\n");
    }

    #[test]
    fn reject_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);

        let cfg = config(&path).policy(AlwaysReject);
        let outcome = check_known_hosts(HOST, PORT, "BB", &cfg).unwrap();

        assert_eq!(outcome, VerificationOutcome::Rejected);
        assert!(!path.exists());
    }

    #[test]
    fn first_use_trusts_new_hosts_and_rejects_changes() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);
        let cfg = config(&path).policy(FirstUse);

        assert!(check_known_hosts(HOST, PORT, "AA", &cfg).unwrap().is_accepted());
        assert!(!check_known_hosts(HOST, PORT, "BB", &cfg).unwrap().is_accepted());
        assert_eq!(fs::read_to_string(&path).unwrap(), "db.example.com:7687 AA\n");
    }

    #[test]
    fn invalid_hostname_fails_before_io() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("known_certs");
        let cfg = config(&path).policy(AlwaysTrust);

        let err = check_known_hosts("", PORT, "AA", &cfg).unwrap_err();
        assert!(err.is_usage_error());

        let long = "h".repeat(256);
        let err = check_known_hosts(&long, PORT, "AA", &cfg).unwrap_err();
        assert!(err.is_usage_error());

        let err = check_known_hosts(HOST, PORT, "", &cfg).unwrap_err();
        assert!(err.is_usage_error());

        assert!(!dir.path().join("nested").exists());
    }

    /// Store whose reads work and whose writes always fail.
    struct ReadOnlyStore(Option<Fingerprint>);

    impl TrustStore for ReadOnlyStore {
        fn lookup(&self, _: &HostKey) -> Result<Option<StoredFingerprint>> {
            Ok(self.0.clone().map(StoredFingerprint::from))
        }

        fn trust(&self, _: &HostKey, _: &Fingerprint) -> Result<()> {
            Err(TofuError::io(
                Path::new("known_certs"),
                std::io::Error::other("disk full"),
            ))
        }
    }

    #[test]
    fn failed_persist_is_an_error_not_an_accept() {
        let host = HostKey::new(HOST, PORT).unwrap();
        let fp = Fingerprint::new("BB").unwrap();

        for stored in [None, Some(Fingerprint::new("AA").unwrap())] {
            let store = ReadOnlyStore(stored);
            let err = verify_with_store(&store, &host, &fp, Some(&AlwaysTrust)).unwrap_err();
            assert!(err.is_io_error());
        }
    }

    #[test]
    fn unreadable_store_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the store file should be.
        let cfg = config(dir.path()).policy(AlwaysTrust);

        let err = check_known_hosts(HOST, PORT, "AA", &cfg).unwrap_err();
        assert!(err.is_io_error());
    }

    #[test]
    fn truncated_stored_value_is_a_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = store_in(&dir);
        let prefix = "A".repeat(MAX_FINGERPRINT_LEN);
        fs::write(&path, format!("db.example.com:7687 {prefix}DEADBEEF\n")).unwrap();

        let cfg = config(&path).policy(AlwaysReject);
        let report = verify(HOST, PORT, &prefix, &cfg).unwrap();

        assert_eq!(report.outcome, VerificationOutcome::Rejected);
        assert_eq!(report.reason, Some(MismatchReason::Mismatch));
    }

    #[test]
    fn store_under_a_regular_file_is_an_io_error_not_an_accept() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not_a_dir");
        fs::write(&file, "").unwrap();
        let cfg = config(&file.join("known_certs")).policy(AlwaysTrust);

        let err = verify(HOST, PORT, "AA", &cfg).unwrap_err();

        assert!(err.is_io_error());
        assert_eq!(fs::read(&file).unwrap(), b"");
    }

    /// Store that knows no hosts and whose writes always fail.
    struct FailingWrites;

    impl TrustStore for FailingWrites {
        fn lookup(&self, _: &HostKey) -> Result<Option<StoredFingerprint>> {
            Ok(None)
        }

        fn trust(&self, key: &HostKey, fingerprint: &Fingerprint) -> Result<()> {
            // Same failure a real store sees when its directory is a file.
            let dir = TempDir::new().unwrap();
            let file = dir.path().join("not_a_dir");
            fs::write(&file, "").unwrap();
            KnownHosts::at(file.join("known_certs")).trust(key, fingerprint)
        }
    }

    #[test]
    fn real_write_failure_is_an_io_error() {
        let host = HostKey::new(HOST, PORT).unwrap();
        let fp = Fingerprint::new("AA").unwrap();

        let err = verify_with_store(&FailingWrites, &host, &fp, Some(&AlwaysTrust)).unwrap_err();

        assert!(err.is_io_error());
    }
}
