//! CLI subprocess integration tests.
//!
//! These tests invoke the `dockgate` binary as a subprocess and verify
//! exit codes, stdout content, and JSON output stability.

use std::process::{Command, Output};

fn dockgate_bin(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dockgate"));
    // Keep the user's ~/.config/dockgate out of the tests.
    cmd.env("HOME", home);
    cmd.env_remove("DOCKGATE_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    let home = tempfile::tempdir().unwrap();
    dockgate_bin(home.path()).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!("stdout is not JSON ({e}): {}", stdout(output));
    })
}

#[test]
fn cli_version_exits_zero() {
    let output = run(&["--version"]);
    assert!(output.status.success(), "dockgate --version must exit 0");
    assert!(stdout(&output).contains("dockgate"));
}

#[test]
fn cli_help_lists_commands() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("check"), "help must list 'check' command");
    assert!(out.contains("probe"), "help must list 'probe' command");
}

#[test]
fn check_passing_version_exits_zero() {
    let output = run(&["check", "linux-20.10.7"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("meets the minimum version 18.09.0"));
}

#[test]
fn check_low_version_exits_one() {
    let output = run(&["check", "linux-17.12.1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("PROVIDER_DOCKER_VERSION_LOW"));
}

#[test]
fn check_windows_exits_one() {
    let output = run(&["check", "windows-20.10.7"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("PROVIDER_DOCKER_WINDOWS_CONTAINERS"));
}

#[test]
fn check_dev_build_is_advisory() {
    let output = run(&["check", "linux-dev"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("current version is dev"));
}

#[test]
fn check_json_output_shape() {
    let output = run(&["--json", "check", "linux-17.12.1"]);
    assert_eq!(output.status.code(), Some(1));
    let v = json(&output);
    assert_eq!(v["version_string"], "linux-17.12.1");
    assert_eq!(v["detected"], "17.12.1");
    assert_eq!(v["minimum"], "18.09.0");
    assert_eq!(v["reason"], "PROVIDER_DOCKER_VERSION_LOW");
    assert_eq!(v["error"], "docker version is less than the minimum required");
    assert_eq!(v["fix"], "");
    assert_eq!(v["healthy"], false);
    assert_eq!(v["needs_improvement"], false);
}

#[test]
fn check_json_advisory() {
    let output = run(&["--json", "check", "linux-foo.bar.baz"]);
    assert_eq!(output.status.code(), Some(0));
    let v = json(&output);
    assert!(v["reason"].is_null());
    assert!(v["error"].is_null());
    assert_eq!(v["healthy"], true);
    assert_eq!(v["needs_improvement"], true);
    assert!(v["fix"]
        .as_str()
        .unwrap()
        .contains("current version is foo.bar.baz"));
}

#[test]
fn min_version_flag_overrides_default() {
    let output = run(&["--min-version", "24.0.0", "check", "linux-20.10.7"]);
    assert_eq!(output.status.code(), Some(1));

    let output = run(&["--min-version", "not-a-version", "check", "linux-20.10.7"]);
    assert!(!output.status.success());
}

#[test]
fn config_file_sets_minimum() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("preflight.toml");
    std::fs::write(&config, "minimum_version = \"23.00.0\"\nruntime_name = \"Moby\"\n").unwrap();

    let output = dockgate_bin(home.path())
        .args(["--config", config.to_str().unwrap(), "check", "linux-dev"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Install the official release of Moby"), "{out}");
    assert!(out.contains("Minimum recommended version is 23.00.0"), "{out}");
}

#[test]
fn default_config_location_is_read() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join(".config/dockgate");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("preflight.toml"), "minimum_version = \"30.00.0\"\n").unwrap();

    let output = dockgate_bin(home.path())
        .args(["check", "linux-20.10.7"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn invalid_config_exits_two() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("preflight.toml");
    std::fs::write(&config, "unknown_key = 1\n").unwrap();

    let output = dockgate_bin(home.path())
        .args(["--config", config.to_str().unwrap(), "check", "linux-20.10.7"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("config error:"));
}

#[test]
fn missing_config_file_exits_two() {
    let output = run(&["--config", "/nonexistent/preflight.toml", "check", "linux-dev"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn probe_missing_runtime_exits_three() {
    let output = run(&["probe", "--runtime-bin", "/nonexistent/docker"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("runtime probe:"));
}

#[test]
fn check_low_version_with_vendor_suffix_exits_one() {
    let output = run(&["--json", "check", "linux-17.03.2+azure"]);
    assert_eq!(output.status.code(), Some(1));
    let v = json(&output);
    assert_eq!(v["detected"], "17.03.2+azure");
    assert_eq!(v["reason"], "PROVIDER_DOCKER_VERSION_LOW");

    let output = run(&["check", "linux-20.10.7+azure"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn min_version_without_patch_renders_zero_patch() {
    let output = run(&["--min-version", "20.10", "--json", "check", "linux-dev"]);
    assert_eq!(output.status.code(), Some(0));
    let v = json(&output);
    assert_eq!(v["minimum"], "20.10.0");
    assert!(v["fix"]
        .as_str()
        .unwrap()
        .contains("Minimum recommended version is 20.10.0, current version is dev"));
}
