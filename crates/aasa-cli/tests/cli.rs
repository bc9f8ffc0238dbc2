use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const VALID: &str = r#"{"applinks":{"apps":[],"details":[{"appID":"TEAMID.com.foo.App","paths":["*"]}]}}"#;

fn manifest_file(content: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(content).unwrap();
    f.flush().unwrap();
    f
}

fn aasa_check() -> Command {
    let mut cmd = Command::cargo_bin("aasa-check").unwrap();
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_validate_plain_manifest_found() {
    let file = manifest_file(VALID.as_bytes());

    aasa_check()
        .args(["validate", "--bundle-id", "com.foo.App", "--team-id", "TEAMID"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"structurallyValid\":true"))
        .stdout(predicate::str::contains("\"identifierFound\":true"))
        .stdout(predicate::str::contains("\"encrypted\":false"));
}

#[test]
fn test_validate_identifier_missing_exit_code() {
    let file = manifest_file(VALID.as_bytes());

    aasa_check()
        .args(["validate", "--bundle-id", "com.foo.App", "--team-id", "OTHER"])
        .arg(file.path())
        .assert()
        .code(5)
        .stdout(predicate::str::contains("\"identifierFound\":false"));
}

#[test]
fn test_validate_structurally_invalid() {
    let file = manifest_file(br#"{"applinks":{"details":[{"appID":"TEAMID.com.foo.App"}]}}"#);

    aasa_check()
        .arg("validate")
        .arg(file.path())
        .assert()
        .code(5)
        .stdout(predicate::str::contains("\"structurallyValid\":false"));
}

#[test]
fn test_validate_not_json() {
    let file = manifest_file(b"\x30\x82\x00\x10binary");

    aasa_check()
        .arg("validate")
        .arg(file.path())
        .assert()
        .code(4)
        .stdout(predicate::str::contains("\"invalidJson\":true"))
        .stdout(predicate::str::contains("\"signatureVerificationFailed\":false"));
}

#[test]
fn test_validate_missing_file() {
    aasa_check()
        .args(["validate", "/nonexistent/apple-app-site-association"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_check_invalid_domain() {
    aasa_check()
        .args(["check", "https:///apple-app-site-association"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"invalidRequest\":true"));
}

#[test]
fn test_team_without_bundle_rejected() {
    aasa_check()
        .args(["check", "example.com", "--team-id", "TEAMID"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bundle-id"));
}
