//! CLI interface tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn stacklet_admin(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stacklet-admin").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("STACKLET_API_KEY")
        .env_remove("STACKLET_CONFIG")
        .env_remove("STACKLET_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn configure(home: &TempDir) -> String {
    let location = home.path().join("config.json");
    stacklet_admin(home)
        .args([
            "configure",
            "--api",
            "https://api.example.stacklet.io",
            "--region",
            "us-east-1",
            "--cognito-client-id",
            "client",
            "--cognito-user-pool-id",
            "pool",
            "--cubejs",
            "https://cubejs.example.stacklet.io",
            "--location",
        ])
        .arg(&location)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved config to"));
    location.to_str().unwrap().to_owned()
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    stacklet_admin(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stacklet-admin"));
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    stacklet_admin(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Command line client for the Stacklet platform API",
        ))
        .stdout(predicate::str::contains("policy-collection"));
}

#[test]
fn test_snippet_options_in_help() {
    let home = TempDir::new().unwrap();
    stacklet_admin(&home)
        .args(["account", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--first"))
        .stdout(predicate::str::contains("--after"));
}

#[test]
fn test_configure_then_show() {
    let home = TempDir::new().unwrap();
    let config = configure(&home);

    let saved = fs::read_to_string(&config).unwrap();
    assert!(saved.contains("\"cubejs\": \"https://cubejs.example.stacklet.io\""));
    assert!(!saved.contains("idp_id"));

    stacklet_admin(&home)
        .args(["--config", &config, "--output", "json", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"api\": \"https://api.example.stacklet.io\"",
        ));
}

#[test]
fn test_show_decodes_id_token() {
    let home = TempDir::new().unwrap();
    let config = configure(&home);

    // {"email":"someone@example.com"}
    let token = "eyJhbGciOiJub25lIn0.eyJlbWFpbCI6InNvbWVvbmVAZXhhbXBsZS5jb20ifQ.sig";
    fs::create_dir_all(home.path().join(".stacklet")).unwrap();
    fs::write(home.path().join(".stacklet").join("id"), token).unwrap();

    stacklet_admin(&home)
        .args(["--config", &config, "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("email: someone@example.com"))
        .stdout(predicate::str::contains("region: us-east-1"));
}

#[test]
fn test_missing_config_error() {
    let home = TempDir::new().unwrap();
    stacklet_admin(&home)
        .env("STACKLET_API_KEY", "token")
        .args(["--config", "nonexistent.json", "account", "list"])
        .assert()
        .failure()
        .code(1) // Configuration error
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_config_error() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.json");
    fs::write(&config, r#"{"api": "https://api.example.stacklet.io"}"#).unwrap();

    stacklet_admin(&home)
        .arg("--config")
        .arg(&config)
        .arg("show")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cognito_user_pool_id"));
}

#[test]
fn test_missing_token_error() {
    let home = TempDir::new().unwrap();
    let config = configure(&home);

    stacklet_admin(&home)
        .args(["--config", &config, "account", "list"])
        .assert()
        .failure()
        .code(2) // Missing token
        .stderr(predicate::str::contains("Authorization token not configured"));
}

#[test]
fn test_policy_show_pre_check() {
    let home = TempDir::new().unwrap();
    stacklet_admin(&home)
        .args(["policy", "show", "--name", "p", "--uuid", "u"])
        .assert()
        .failure()
        .code(5) // Invalid input
        .stderr(predicate::str::contains(
            "Either name or uuid can be set, but not both",
        ));

    stacklet_admin(&home)
        .args(["policy", "show-source"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Either name or uuid must be set"));
}

#[test]
fn test_invalid_provider_choice() {
    let home = TempDir::new().unwrap();
    stacklet_admin(&home)
        .args(["account", "show", "--provider", "Oracle", "--key", "123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'Oracle'"));
}

#[test]
fn test_auto_configure_needs_url_or_prefix() {
    let home = TempDir::new().unwrap();
    stacklet_admin(&home)
        .arg("auto-configure")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url"));

    stacklet_admin(&home)
        .args(["auto-configure", "--url", "a.example.io", "--prefix", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
