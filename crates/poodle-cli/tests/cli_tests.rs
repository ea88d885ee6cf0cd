//! End-to-end tests for the poodle binary
//!
//! Every test points `--config` at a temporary file so the user's home
//! directory is never read or written.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HTTPBIN: &str = r#"[Main]
id = "httpbin"
name = "HTTP Bin"
service_url = "https://httpbin.org"
timeout = "5s"

[[Endpoint]]
id = "get_ip"
name = "Get IP"
method = "get"
uri = "/ip"

[[Endpoint]]
id = "post_anything"
name = "Post Anything"
method = "post"
uri = "/anything"
"#;

/// Get a Command for the poodle binary
fn poodle_cmd() -> Command {
    let mut cmd = Command::cargo_bin("poodle").expect("Failed to find poodle binary");
    cmd.env("NO_COLOR", "1").env_remove("POODLE_CONFIG");
    cmd
}

/// A config file whose services directory lives in the same temp dir.
fn setup(temp: &TempDir, extra: &str) -> PathBuf {
    let services = temp.path().join("services");
    fs::create_dir_all(&services).unwrap();
    let config = temp.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "[General]\nselectcmd = \"\"\n\n[Services]\ndirectory = \"{}\"\n{}",
            services.display(),
            extra
        ),
    )
    .unwrap();
    config
}

fn write_service(temp: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = temp.path().join("services").join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn with_config(config: &Path) -> Command {
    let mut cmd = poodle_cmd();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_help_lists_commands() {
    poodle_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("call"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn test_version() {
    poodle_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("poodle"));
}

#[test]
fn test_no_command_shows_hint() {
    poodle_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("poodle --help"));
}

#[test]
fn test_list_shows_endpoints() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");
    write_service(&temp, "httpbin.toml", HTTPBIN);

    with_config(&config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("httpbin - get_ip"))
        .stdout(predicate::str::contains("httpbin - post_anything"))
        .stdout(predicate::str::contains("POST"));
}

#[test]
fn test_list_empty_directory() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");

    with_config(&config)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("No endpoints found"));
}

#[test]
fn test_missing_config_exits_with_config_code() {
    let temp = TempDir::new().unwrap();

    with_config(&temp.path().join("absent.toml"))
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("poodle configure"));
}

#[test]
fn test_config_from_environment() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");
    write_service(&temp, "httpbin.toml", HTTPBIN);

    poodle_cmd()
        .env("POODLE_CONFIG", &config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("httpbin - get_ip"));
}

#[test]
fn test_invalid_method_is_rejected_on_load() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");
    write_service(&temp, "bad.toml", &HTTPBIN.replace("method = \"get\"", "method = \"trace\""));

    with_config(&config)
        .arg("list")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("trace"));
}

#[test]
fn test_call_unknown_endpoint() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");
    write_service(&temp, "httpbin.toml", HTTPBIN);

    with_config(&config)
        .current_dir(temp.path())
        .args(["call", "httpbin - nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("httpbin - nope"));
}

#[test]
fn test_call_from_file_without_config() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".poodle.toml"), HTTPBIN).unwrap();

    with_config(&temp.path().join("absent.toml"))
        .current_dir(temp.path())
        .args(["call", "other - get_ip"])
        .assert()
        .code(4);
}

#[test]
fn test_new_creates_definition() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");

    with_config(&config)
        .env("EDITOR", "true")
        .args(["new", "team/billing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(temp.path().join("services/team/billing.toml")).unwrap();
    assert!(content.contains("team/billing"));

    with_config(&config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("team/billing - get_ip"));
}

#[test]
fn test_new_rejects_invalid_id() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");

    with_config(&config)
        .env("EDITOR", "true")
        .args(["new", "bad id!"])
        .assert()
        .code(3);
}

#[test]
fn test_new_refuses_existing() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");
    write_service(&temp, "httpbin.toml", HTTPBIN);

    with_config(&config)
        .env("EDITOR", "true")
        .args(["new", "httpbin"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_edit_reports_broken_definition() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");
    write_service(&temp, "broken.toml", "[Main\n");

    with_config(&config)
        .env("EDITOR", "true")
        .args(["edit", "broken"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning"));
}

#[test]
fn test_delete_without_credentials_is_local_only() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");
    let path = write_service(&temp, "httpbin.toml", HTTPBIN);

    with_config(&config)
        .args(["delete", "httpbin", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    assert!(!path.exists());
}

#[test]
fn test_delete_unknown_service() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");

    with_config(&config)
        .args(["delete", "ghost", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_sync_requires_credentials() {
    let temp = TempDir::new().unwrap();
    let config = setup(&temp, "");

    with_config(&config)
        .arg("sync")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("poodle configure"));
}

#[test]
fn test_configure_edit_creates_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("poodle/config.toml");

    with_config(&config)
        .env("EDITOR", "true")
        .env("HOME", temp.path())
        .args(["configure", "--edit"])
        .assert()
        .success();

    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("[General]"));
    assert!(content.contains("[Gist]"));
    assert!(temp.path().join("poodle/definitions").is_dir());
}

#[test]
fn test_completions() {
    poodle_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("poodle"));
}
