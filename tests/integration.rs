use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn cmd() -> Command {
    Command::cargo_bin("infra-audit").unwrap()
}

fn fixture(name: &str) -> PathBuf {
    fixtures_path().join(name)
}

mod aggregation {
    use super::*;

    #[test]
    fn test_aggregate_two_tools() {
        cmd()
            .arg(fixture("vault.json"))
            .arg(fixture("s3.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Infrastructure Audit Report"))
            .stdout(predicate::str::contains("Issues: 4"))
            .stdout(predicate::str::contains("Tools: 2 total, 2 supported"));
    }

    #[test]
    fn test_aggregate_json_output() {
        let output = cmd()
            .args(["--format", "json"])
            .arg(fixture("vault.json"))
            .output()
            .unwrap();
        assert!(output.status.success());

        let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(parsed["summary"]["total_issues"], 2);
        assert_eq!(parsed["issues"][0]["tool"], "vault");
    }

    #[test]
    fn test_generic_v1_envelope() {
        cmd()
            .args(["--format", "json"])
            .arg(fixture("v1.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("zone/api.example.com"))
            .stdout(predicate::str::contains("\"category\": \"missing\""));
    }

    #[test]
    fn test_unsupported_only_batch_is_unknown_health() {
        cmd()
            .arg(fixture("unsupported.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("UNKNOWN"))
            .stdout(predicate::str::contains("Issues: 0"))
            .stdout(predicate::str::contains("1 unsupported"));
    }

    #[test]
    fn test_verbose_lists_issues() {
        cmd()
            .arg("--verbose")
            .arg(fixture("vault.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("secret/app/db"));
    }

    #[test]
    fn test_no_report_files_is_usage_error() {
        cmd()
            .assert()
            .code(2)
            .stderr(predicate::str::contains("no report files"));
    }

    #[test]
    fn test_payload_mismatch_aborts() {
        cmd()
            .arg(fixture("vault.json"))
            .arg(fixture("mismatch.json"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("does not carry a vault payload"));
    }

    #[test]
    fn test_unknown_tool_aborts() {
        cmd()
            .arg(fixture("unknown-tool.json"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Unknown tool type: redis"));
    }

    #[test]
    fn test_missing_file_is_operational_error() {
        cmd()
            .arg("/no/such/report.json")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Failed to read"));
    }
}

mod diff_gate {
    use super::*;
    use std::fs;

    #[test]
    fn test_diff_against_identical_baseline_passes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let baseline_path = tmp.path().join("baseline.json");

        let output = cmd()
            .args(["--format", "json"])
            .arg(fixture("vault.json"))
            .output()
            .unwrap();
        fs::write(&baseline_path, &output.stdout).unwrap();

        cmd()
            .arg("--diff")
            .arg(&baseline_path)
            .arg(fixture("vault.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Delta: +0 (new: 0, resolved: 0)"));
    }

    #[test]
    fn test_diff_with_new_issues_fails_gate() {
        let tmp = tempfile::TempDir::new().unwrap();
        let baseline_path = tmp.path().join("baseline.json");

        let output = cmd()
            .args(["--format", "json"])
            .arg(fixture("vault.json"))
            .output()
            .unwrap();
        fs::write(&baseline_path, &output.stdout).unwrap();

        cmd()
            .arg("--diff")
            .arg(&baseline_path)
            .arg(fixture("vault.json"))
            .arg(fixture("s3.json"))
            .assert()
            .code(1)
            .stdout(predicate::str::contains("s3|misconfig|s3://app-logs"));
    }
}

mod history {
    use super::*;

    #[test]
    fn test_save_then_trend() {
        let tmp = tempfile::TempDir::new().unwrap();
        let history_dir = tmp.path().join("runs");

        cmd()
            .arg("--save")
            .arg("--history-dir")
            .arg(&history_dir)
            .arg(fixture("vault.json"))
            .arg(fixture("s3.json"))
            .assert()
            .success();

        cmd()
            .arg("--save")
            .arg("--history-dir")
            .arg(&history_dir)
            .arg(fixture("vault.json"))
            .assert()
            .success()
            // A second run against stored history carries a trend line.
            .stdout(predicate::str::contains("Trend:"));

        cmd()
            .args(["--trend", "5"])
            .arg("--history-dir")
            .arg(&history_dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Trend Analysis"))
            .stdout(predicate::str::contains("Runs analyzed:"));
    }

    #[test]
    fn test_trend_without_history_dir_is_usage_error() {
        cmd()
            .args(["--trend", "5"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--trend requires --history-dir"));
    }

    #[test]
    fn test_trend_on_empty_history() {
        let tmp = tempfile::TempDir::new().unwrap();
        cmd()
            .args(["--trend", "5"])
            .arg("--history-dir")
            .arg(tmp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No historical runs found"));
    }

    #[test]
    fn test_save_without_history_dir_is_usage_error() {
        cmd()
            .arg("--save")
            .arg(fixture("vault.json"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--save requires --history-dir"));
    }
}
