//! Integration tests for the `tofu` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("known_certs")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn write_store(&self, content: &str) {
        std::fs::write(self.store(), content).unwrap();
    }

    fn read_store(&self) -> String {
        std::fs::read_to_string(self.store()).unwrap()
    }

    /// The `tofu` command isolated to this sandbox.
    fn tofu(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tofu"));
        cmd.env("RUST_LOG", "error")
            .env("NO_COLOR", "1")
            .env_remove("TOFU_KNOWN_HOSTS")
            .env_remove("TOFU_CONFIG")
            .arg("--no-color")
            .arg("--store")
            .arg(self.store())
            .arg("--config")
            .arg(self.config());
        cmd
    }
}

fn temp_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .ends_with(".tmp")
        })
        .count()
}

mod check {
    use super::*;

    #[test]
    fn matching_fingerprint_is_accepted() {
        let sb = Sandbox::new();
        sb.write_store("db.example.com:7687 11:22:33\n");

        sb.tofu()
            .args(["check", "db.example.com", "7687", "11:22:33", "--policy", "reject"])
            .assert()
            .success()
            .stdout(predicate::str::contains("matches"));
    }

    #[test]
    fn unknown_host_trusted_and_recorded() {
        let sb = Sandbox::new();

        sb.tofu()
            .args(["check", "db.example.com", "7687", "11:22:33", "--policy", "trust"])
            .assert()
            .success()
            .stdout(predicate::str::contains("trusted and recorded"));

        assert_eq!(sb.read_store(), "db.example.com:7687 11:22:33\n");
        assert_eq!(temp_files(sb.dir.path()), 0);
    }

    #[test]
    fn changed_fingerprint_rejected_fails() {
        let sb = Sandbox::new();
        sb.write_store("a.com:80 AA\n");

        sb.tofu()
            .args(["check", "a.com", "80", "BB", "--policy", "reject"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("fingerprint changed"))
            .stderr(predicate::str::contains("rejected"));

        assert_eq!(sb.read_store(), "a.com:80 AA\n");
    }

    #[test]
    fn first_use_rejects_changed_host() {
        let sb = Sandbox::new();
        sb.write_store("a.com:80 AA\n");

        sb.tofu()
            .args(["check", "a.com", "80", "BB", "--policy", "first-use"])
            .assert()
            .failure();

        sb.tofu()
            .args(["check", "b.com", "80", "BB", "--policy", "first-use"])
            .assert()
            .success();

        assert_eq!(sb.read_store(), "a.com:80 AA\nb.com:80 BB\n");
    }

    #[test]
    fn accept_once_leaves_store_alone() {
        let sb = Sandbox::new();

        sb.tofu()
            .args(["check", "a.com", "80", "AA", "--policy", "once"])
            .assert()
            .success()
            .stdout(predicate::str::contains("this run only"));

        assert!(!sb.store().exists());
    }

    #[test]
    fn ask_without_terminal_rejects() {
        let sb = Sandbox::new();

        sb.tofu()
            .args(["check", "a.com", "80", "AA"])
            .assert()
            .failure();

        assert!(!sb.store().exists());
    }

    #[test]
    fn policy_from_config() {
        let sb = Sandbox::new();
        std::fs::write(sb.config(), "policy = \"trust\"\n").unwrap();

        sb.tofu()
            .args(["check", "a.com", "80", "AA"])
            .assert()
            .success();

        assert_eq!(sb.read_store(), "a.com:80 AA\n");
    }

    #[test]
    fn json_report() {
        let sb = Sandbox::new();

        let output = sb
            .tofu()
            .args(["-o", "json", "check", "a.com", "80", "AA", "--policy", "trust"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["host"], "a.com:80");
        assert_eq!(report["outcome"], "accepted");
        assert_eq!(report["reason"], "unrecognized");
        assert_eq!(report["decision"], "trust_and_persist");
        assert_eq!(report["persisted"], true);
    }

    #[test]
    fn invalid_hostname_is_a_usage_error() {
        let sb = Sandbox::new();

        sb.tofu()
            .args(["check", "", "80", "AA", "--policy", "trust"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("hostname"));

        assert!(!sb.store().exists());
    }
}

mod manage {
    use super::*;

    #[test]
    fn trust_show_forget() {
        let sb = Sandbox::new();

        sb.tofu()
            .args(["trust", "a.com", "443", "AA:BB"])
            .assert()
            .success();

        sb.tofu()
            .args(["show", "a.com", "443"])
            .assert()
            .success()
            .stdout(predicate::str::contains("AA:BB"));

        sb.tofu()
            .args(["forget", "a.com", "443"])
            .assert()
            .success()
            .stdout(predicate::str::contains("removed"));

        sb.tofu()
            .args(["show", "a.com", "443"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not in"));
    }

    #[test]
    fn trust_replaces_existing_record() {
        let sb = Sandbox::new();
        sb.write_store("a.com:443 OLD\nb.com:443 KEEP\n");

        sb.tofu()
            .args(["trust", "a.com", "443", "NEW"])
            .assert()
            .success();

        assert_eq!(sb.read_store(), "b.com:443 KEEP\na.com:443 NEW\n");
    }

    #[test]
    fn forget_missing_host_is_not_an_error() {
        let sb = Sandbox::new();

        sb.tofu()
            .args(["forget", "a.com", "443"])
            .assert()
            .success()
            .stdout(predicate::str::contains("was not in the store"));
    }

    #[test]
    fn list_formats() {
        let sb = Sandbox::new();
        sb.write_store("a.com:80 AA\nb.com:443 BB\n");

        sb.tofu()
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("a.com"))
            .stdout(predicate::str::contains("Total:"));

        let output = sb.tofu().args(["list", "-o", "json"]).output().unwrap();
        let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(records.as_array().unwrap().len(), 2);
        assert_eq!(records[1]["fingerprint"], "BB");
    }

    #[test]
    fn list_empty_store() {
        let sb = Sandbox::new();

        sb.tofu()
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No trusted hosts"));
    }

    #[test]
    fn path_prints_store() {
        let sb = Sandbox::new();

        sb.tofu()
            .arg("path")
            .assert()
            .success()
            .stdout(predicate::str::contains("known_certs"));
    }
}

mod config {
    use super::*;

    #[test]
    fn set_and_show() {
        let sb = Sandbox::new();

        sb.tofu()
            .args(["config", "set", "policy", "first-use"])
            .assert()
            .success();

        sb.tofu()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("first-use"));

        let saved = std::fs::read_to_string(sb.config()).unwrap();
        assert!(saved.contains("policy = \"first-use\""));
    }

    #[test]
    fn unknown_key_fails() {
        let sb = Sandbox::new();

        sb.tofu()
            .args(["config", "set", "api_key", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn store_path_from_config() {
        let sb = Sandbox::new();
        let other = sb.dir.path().join("other_store");
        std::fs::write(
            sb.config(),
            format!("store_path = \"{}\"\n", other.display()),
        )
        .unwrap();

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tofu"));
        cmd.env("RUST_LOG", "error")
            .env_remove("TOFU_KNOWN_HOSTS")
            .arg("--config")
            .arg(sb.config())
            .arg("path")
            .assert()
            .success()
            .stdout(predicate::str::contains("other_store"));
    }
}
