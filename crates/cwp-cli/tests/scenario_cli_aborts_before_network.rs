use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// `cwp` must fail on a bad alarm file before any AWS client is built, must
/// fail on unusable credentials before the first existence check, and must
/// finish without prompting or connecting when the list is empty.
///
/// Every case here is offline: none of them reaches CloudWatch.

fn cwp() -> Command {
    let mut cmd = Command::cargo_bin("cwp").expect("cwp binary must build");
    // Keep the run hermetic: no dev .env.local, no inherited overrides.
    cmd.env_remove("CWP_ENV")
        .env_remove("CWP_REGION")
        .env_remove("CWP_ALARM_FILE")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn missing_alarm_file_fails_with_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    cwp()
        .current_dir(dir.path())
        .args(["--file", path.to_str().unwrap(), "delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alarm list could not be loaded"))
        .stderr(predicate::str::contains("failed to read alarm list"))
        .stdout(predicate::str::contains("Checking alarm").not());
}

#[test]
fn malformed_alarm_file_fails_with_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alarms.yaml");
    fs::write(&path, "cloudwatch_alarm_list: [a, b\n").unwrap();

    cwp()
        .current_dir(dir.path())
        .args(["--file", path.to_str().unwrap(), "delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid yaml"));
}

/// Point the AWS SDK at empty shared-config files and strip every other
/// credential source, so resolving any profile fails without a network call.
fn without_aws_credentials(cmd: &mut Command, empty_config: &std::path::Path) {
    cmd.env("AWS_CONFIG_FILE", empty_config)
        .env("AWS_SHARED_CREDENTIALS_FILE", empty_config)
        .env("AWS_EC2_METADATA_DISABLED", "true");
    for var in [
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
        "AWS_SESSION_TOKEN",
        "AWS_PROFILE",
        "AWS_DEFAULT_PROFILE",
        "AWS_WEB_IDENTITY_TOKEN_FILE",
        "AWS_ROLE_ARN",
        "AWS_CONTAINER_CREDENTIALS_RELATIVE_URI",
        "AWS_CONTAINER_CREDENTIALS_FULL_URI",
    ] {
        cmd.env_remove(var);
    }
}

#[test]
fn missing_credentials_abort_before_any_check() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alarms.yaml");
    fs::write(&path, "cloudwatch_alarm_list:\n  - api-5xx\n").unwrap();
    let empty_config = dir.path().join("aws-empty");
    fs::write(&empty_config, "").unwrap();

    for subcommand in ["delete", "check"] {
        let mut cmd = cwp();
        without_aws_credentials(&mut cmd, &empty_config);

        cmd.current_dir(dir.path())
            .args(["--file", path.to_str().unwrap(), subcommand])
            .write_stdin("yes\n")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("failed to create CloudWatch client"))
            .stderr(predicate::str::contains("credential error"))
            .stdout(predicate::str::contains("Found 1 CloudWatch alarm(s)"))
            .stdout(predicate::str::contains("Checking alarm").not())
            .stdout(predicate::str::contains("Do you want to continue").not());
    }
}

#[test]
fn default_file_name_is_read_from_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cloudwatch-alarms.yaml"), "cloudwatch_alarm_list: []\n").unwrap();

    cwp()
        .current_dir(dir.path())
        .arg("delete")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 CloudWatch alarm(s)"));
}

#[test]
fn empty_list_reports_nothing_to_delete_without_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alarms.yaml");
    fs::write(&path, "cloudwatch_alarm_list: []\n").unwrap();

    cwp()
        .current_dir(dir.path())
        .args(["--file", path.to_str().unwrap(), "delete", "--strict"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No alarms to delete."))
        .stdout(predicate::str::contains("Successfully deleted: 0 alarm(s)"))
        .stdout(predicate::str::contains("Failed deletions: 0 alarm(s)"))
        .stdout(predicate::str::contains("Do you want to continue").not());
}

#[test]
fn empty_list_json_report_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alarms.yaml");
    fs::write(&path, "other_key: 1\n").unwrap();

    let out = cwp()
        .current_dir(dir.path())
        .args(["--file", path.to_str().unwrap(), "--format", "json", "check"])
        .output()
        .unwrap();

    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout must be json");
    assert_eq!(v["outcome"], "check_only");
    assert_eq!(v["checked"], 0);
    assert!(v["run_id"].is_string());
    assert!(v["alarm_list_hash"].is_string());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("/other_key"), "unused key warning expected: {stderr}");
}

#[test]
fn help_lists_subcommands_and_flags() {
    cwp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("--env"))
        .stdout(predicate::str::contains("--region"));
}
