//! Tests for error handling and CLI flags.

use crate::support::*;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("--deploy"));
    assert!(out.contains("--env-file"));
    assert!(out.contains("--clipboard"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_arguments_fail() {
    let t = Test::new();

    t.cmd().arg("mandeep").assert().failure();
}

#[test]
fn test_unknown_repository() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--password", "pw", "mandeep", "travis-encrypt"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "no public key found for user 'mandeep'");
    assert_stderr_contains(&output, "case-sensitive");
}

#[test]
fn test_unknown_repository_leaves_file_untouched() {
    let t = Test::new();
    let original = "language: python\n";
    t.write(".travis.yml", original);

    let output = t
        .cmd()
        .args(["--password", "pw", "nobody", "nothing", ".travis.yml"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_eq!(t.read(".travis.yml"), original);
}

#[test]
fn test_server_error_reported() {
    let t = Test::with_status(500, "<html>oops</html>");

    let output = t.encrypt("pw", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "HTTP 500");
}

#[test]
fn test_unreachable_api_reported() {
    let t = Test::new();

    // Port 9 (discard) on loopback is closed on test machines.
    let output = t
        .cmd()
        .env("TRAVIS_ENCRYPT_API_URL", "http://127.0.0.1:9")
        .args(["--password", "pw", USERNAME, REPOSITORY])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "--api-url");
}

#[test]
fn test_api_url_flag_overrides_env() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("TRAVIS_ENCRYPT_API_URL", "http://127.0.0.1:9")
        .args(["--api-url", t.server.url(), "--password", "pw", USERNAME, REPOSITORY])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_empty_password_rejected() {
    let t = Test::new();

    let output = t
        .cmd()
        .args([USERNAME, REPOSITORY])
        .write_stdin("\n")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "password");
}

#[test]
fn test_invalid_slug_rejected() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--password", "pw", "mandeep/extra", REPOSITORY])
        .output()
        .unwrap();
    assert_failure(&output);
}

#[test]
fn test_password_too_large() {
    let t = Test::new();
    let password = "x".repeat(246);

    let output = t.encrypt(&password, &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "245");
}

#[test]
fn test_invalid_yaml_rejected() {
    let t = Test::new();
    let original = "language: [python\n";
    t.write(".travis.yml", original);

    let output = t.encrypt_to_file("pw", &[]);
    assert_failure(&output);
    assert_eq!(t.read(".travis.yml"), original);
}

#[test]
fn test_shape_error_names_path() {
    let t = Test::new();
    let original = "deploy: heroku\n";
    t.write(".travis.yml", original);

    let output = t.encrypt_to_file("pw", &["--deploy"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "deploy");
    assert_stderr_contains(&output, "expected a mapping");
    assert_eq!(t.read(".travis.yml"), original);
}

#[test]
fn test_verbose_logs_debug() {
    let t = Test::new();

    let output = t.encrypt("pw", &["--verbose"]);
    assert_success(&output);
    assert_stderr_contains(&output, "DEBUG");
}

#[test]
fn test_log_env_var_overrides_verbose() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("TRAVIS_ENCRYPT_LOG", "off")
        .args(["--verbose", "--password", "pw", USERNAME, REPOSITORY])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(!stderr(&output).contains("DEBUG"));
}

#[test]
fn test_quiet_by_default() {
    let t = Test::new();

    let output = t.encrypt("pw", &[]);
    assert_success(&output);
    assert!(stderr(&output).is_empty(), "unexpected stderr: {}", stderr(&output));
}

#[test]
fn test_binary_runs_without_harness_env() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("travis-encrypt").unwrap();
    cmd.arg("--help").assert().success();
}
