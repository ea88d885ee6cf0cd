//! Integration tests for service loading and the endpoint catalog

use poodle_fs::NormalizedPath;
use poodle_meta::{Catalog, Error, Security, Service, ServiceLoader, SortBy};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GITHUB: &str = r#"
[Main]
id = "github"
name = "GitHub"
service_url = "https://api.github.com"
timeout = "10s"
headers = [["Accept", "application/vnd.github+json"]]

[Security]
scheme = "bearer"
[Security.Bearer]
header = ["Authorization", "Bearer {$token}"]

[[Endpoint]]
id = "list_repos"
name = "List repositories"
method = "get"
uri = "/users/{$user}/repos"

[[Endpoint]]
id = "create_repo"
name = "Create repository"
method = "POST"
uri = "/user/repos"
body = "{\"name\": \"{$name}\"}"
"#;

const BILLING: &str = r#"
[Main]
id = "team/billing"
name = "Billing"
service_url = "https://billing.internal"

[Security]
scheme = "api-key"
[Security.ApiKey]
header = ["X-API-KEY", "{$api_key}"]

[[Endpoint]]
id = "invoices"
name = "Invoices"
method = "get"
uri = "/invoices"
"#;

fn write(dir: &Path, relative: &str, content: &str) -> NormalizedPath {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    NormalizedPath::new(path)
}

#[test]
fn test_load_file_decodes_security_variant() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "github.toml", GITHUB);

    let service = ServiceLoader::new().load_file(&path).unwrap();

    assert_eq!(service.main.id, "github");
    assert_eq!(service.main.timeout().unwrap().as_secs(), 10);
    assert_eq!(service.endpoints.len(), 2);
    match &service.security {
        Security::Bearer { header } => {
            assert_eq!(header.name, "Authorization");
            assert_eq!(header.value, "Bearer {$token}");
        }
        other => panic!("expected bearer, got {:?}", other),
    }
}

#[test]
fn test_load_file_rejects_unsupported_method() {
    let temp = TempDir::new().unwrap();
    let path = write(
        temp.path(),
        "bad.toml",
        r#"
[Main]
id = "bad"

[[Endpoint]]
id = "opts"
method = "options"
"#,
    );

    let err = ServiceLoader::new().load_file(&path).unwrap_err();
    match err {
        Error::UnsupportedMethod {
            service,
            endpoint,
            method,
        } => {
            assert_eq!(service, "bad");
            assert_eq!(endpoint, "opts");
            assert_eq!(method, "options");
        }
        other => panic!("expected UnsupportedMethod, got {:?}", other),
    }
}

#[test]
fn test_load_file_rejects_bad_timeout() {
    let temp = TempDir::new().unwrap();
    let path = write(
        temp.path(),
        "slow.toml",
        "[Main]\nid = \"slow\"\ntimeout = \"2m\"\n",
    );

    let err = ServiceLoader::new().load_file(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidTimeout { .. }));
}

#[test]
fn test_load_file_decode_error() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "broken.toml", "[Main\nid = ");

    let err = ServiceLoader::new().load_file(&path).unwrap_err();
    assert!(matches!(err, Error::ServiceDecode { .. }));
}

#[test]
fn test_unknown_security_scheme_is_decode_error() {
    let temp = TempDir::new().unwrap();
    let path = write(
        temp.path(),
        "oauth.toml",
        "[Main]\nid = \"oauth\"\n\n[Security]\nscheme = \"oauth2\"\n",
    );

    let err = ServiceLoader::new().load_file(&path).unwrap_err();
    match err {
        Error::ServiceDecode { message, .. } => assert!(message.contains("oauth2")),
        other => panic!("expected ServiceDecode, got {:?}", other),
    }
}

#[test]
fn test_load_dir_walks_subdirectories() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "github.toml", GITHUB);
    write(temp.path(), "team/billing.toml", BILLING);
    write(temp.path(), "notes.md", "not a service");

    let services = ServiceLoader::new()
        .load_dir(&NormalizedPath::new(temp.path()))
        .unwrap();

    let ids: Vec<_> = services.iter().map(|(_, s)| s.main.id.as_str()).collect();
    assert_eq!(ids, vec!["github", "team/billing"]);
}

#[test]
fn test_load_dir_aborts_on_one_bad_file() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "github.toml", GITHUB);
    write(temp.path(), "zzz.toml", "[Main\n");

    let result = ServiceLoader::new().load_dir(&NormalizedPath::new(temp.path()));
    assert!(matches!(result, Err(Error::ServiceDecode { .. })));
}

#[test]
fn test_catalog_sorted_by_key() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "github.toml", GITHUB);
    write(temp.path(), "team/billing.toml", BILLING);

    let catalog = Catalog::load_dir(&NormalizedPath::new(temp.path()), SortBy::Key).unwrap();

    assert_eq!(
        catalog.keys(),
        vec![
            "github - create_repo",
            "github - list_repos",
            "team/billing - invoices",
        ]
    );
    assert_eq!(catalog.entries()[0].method, "POST");
}

#[test]
fn test_catalog_sorted_by_name() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "github.toml", GITHUB);
    write(temp.path(), "team/billing.toml", BILLING);

    let catalog = Catalog::load_dir(&NormalizedPath::new(temp.path()), SortBy::Name).unwrap();

    assert_eq!(
        catalog.keys(),
        vec![
            "team/billing - invoices",
            "github - create_repo",
            "github - list_repos",
        ]
    );
}

#[test]
fn test_catalog_lookup() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "github.toml", GITHUB);
    write(temp.path(), "team/billing.toml", BILLING);

    let catalog = Catalog::load_dir(&NormalizedPath::new(temp.path()), SortBy::Key).unwrap();

    let service = catalog.service_for("team/billing - invoices").unwrap();
    assert_eq!(service.main.name, "Billing");
    assert!(catalog.service_for("github - delete_repo").is_none());

    let (path, _) = catalog.service_by_id("github").unwrap();
    assert!(path.as_str().ends_with("github.toml"));
}

#[test]
fn test_catalog_from_single_file() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), ".poodle.toml", BILLING);

    let catalog = Catalog::load_file(&path).unwrap();
    assert_eq!(catalog.keys(), vec!["team/billing - invoices"]);
}

#[test]
fn test_empty_directory_gives_empty_catalog() {
    let temp = TempDir::new().unwrap();
    let catalog =
        Catalog::load_dir(&NormalizedPath::new(temp.path().join("missing")), SortBy::Key).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_template_loads_back() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("httpbin.toml"));
    poodle_fs::ConfigStore::new()
        .save(&path, &Service::template("httpbin"))
        .unwrap();

    let service = ServiceLoader::new().load_file(&path).unwrap();
    assert_eq!(service, Service::template("httpbin"));
}
