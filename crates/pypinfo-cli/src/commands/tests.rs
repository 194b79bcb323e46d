//! Unit tests for CLI commands.

use super::*;

use clap::{CommandFactory, Parser};
use pypinfo_core::error::PypiError;
use pypinfo_core::types::{ChangelogEntry, Record, SearchField, SearchTerm, Value};
use pypinfo_registry::xmlrpc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::Cli;

/// Answer `procedure` with `value`, exactly once
async fn mount_procedure(server: &MockServer, procedure: &str, value: Value) {
    Mock::given(method("POST"))
        .and(path("/pypi"))
        .and(body_string_contains(format!("<methodName>{}</methodName>", procedure)))
        .respond_with(ResponseTemplate::new(200).set_body_string(xmlrpc::encode_response(&value)))
        .expect(1)
        .mount(server)
        .await;
}

fn test_context(server: &MockServer) -> CommandContext {
    CommandContext::new(&format!("{}/pypi", server.uri()), true).unwrap()
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_releases_defaults() {
    let cli = Cli::try_parse_from(["pypinfo", "releases", "PyRedstone"]).unwrap();
    match cli.command {
        Commands::Releases { package, hidden } => {
            assert_eq!(package, "PyRedstone");
            assert!(!hidden);
        },
        _ => panic!("Expected releases command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "pypinfo",
        "changelog",
        "1480523283",
        "--with-ids",
        "--json",
        "--index-url",
        "http://localhost:8080/pypi",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.index_url, "http://localhost:8080/pypi");
    match cli.command {
        Commands::Changelog { since, with_ids } => {
            assert_eq!(since, 1480523283);
            assert!(with_ids);
        },
        _ => panic!("Expected changelog command"),
    }
}

#[test]
fn test_parse_search_requires_terms() {
    assert!(Cli::try_parse_from(["pypinfo", "search"]).is_err());
    assert!(Cli::try_parse_from(["pypinfo", "browse"]).is_err());
}

#[test]
fn test_parse_demo_defaults() {
    let cli = Cli::try_parse_from(["pypinfo", "demo"]).unwrap();
    match cli.command {
        Commands::Demo { package, delay_ms } => {
            assert_eq!(package, "PyRedstone");
            assert_eq!(delay_ms, 200);
        },
        _ => panic!("Expected demo command"),
    }
}

#[test]
fn test_parse_search_terms() {
    let terms = vec![
        "name=foo".to_string(),
        "description=spam and eggs".to_string(),
        "name=bar".to_string(),
    ];
    let spec = search::parse_search_terms(&terms).unwrap();

    assert_eq!(spec.len(), 2);
    assert_eq!(
        spec.get(SearchField::Name),
        Some(&SearchTerm::Any(vec!["foo".to_string(), "bar".to_string()]))
    );
    assert_eq!(
        spec.get(SearchField::Description),
        Some(&SearchTerm::One("spam and eggs".to_string()))
    );
}

#[test]
fn test_parse_search_terms_keeps_equals_in_value() {
    let spec = search::parse_search_terms(&["summary=a=b".to_string()]).unwrap();
    assert_eq!(spec.get(SearchField::Summary), Some(&SearchTerm::One("a=b".to_string())));
}

#[test]
fn test_parse_search_terms_rejects_bad_input() {
    let err = search::parse_search_terms(&["name".to_string()]).unwrap_err();
    assert!(matches!(err, PypiError::InvalidArgument { .. }));

    let err = search::parse_search_terms(&["classifiers=x".to_string()]).unwrap_err();
    assert!(err.to_string().contains("not a search field"));
}

#[test]
fn test_format_timestamp() {
    assert_eq!(changelog::format_timestamp(1480523283), "2016-11-30 16:28:03 UTC");
    assert_eq!(changelog::format_timestamp(0), "1970-01-01 00:00:00 UTC");
    assert_eq!(changelog::format_timestamp(i64::MAX), i64::MAX.to_string());
}

#[test]
fn test_format_entry() {
    let entry = ChangelogEntry {
        name: "spam".to_string(),
        version: None,
        timestamp: 1480523283,
        action: "create".to_string(),
        serial: Some(42),
    };
    assert_eq!(
        changelog::format_entry(&entry),
        "2016-11-30 16:28:03 UTC #42  spam -  create"
    );
}

#[test]
fn test_context_rejects_bad_index_url() {
    let err = CommandContext::new("pypi.org", false).err().unwrap();
    assert!(matches!(err, PypiError::InvalidUrl { .. }));
}

#[tokio::test]
async fn test_dispatch_releases() {
    let server = MockServer::start().await;
    mount_procedure(&server, "package_releases", Value::from(vec!["1.0", "1.1"])).await;

    let ctx = test_context(&server);
    let command = Commands::Releases {
        package: "ExamplePkg".to_string(),
        hidden: false,
    };
    dispatch_command(command, &ctx).await.unwrap();
}

#[tokio::test]
async fn test_dispatch_surfaces_fault() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pypi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xmlrpc::encode_fault(1, "boom")))
        .mount(&server)
        .await;

    let ctx = test_context(&server);
    let err = dispatch_command(Commands::LastSerial, &ctx).await.unwrap_err();
    assert!(matches!(err, PypiError::Fault { code: 1, .. }));
}

#[tokio::test]
async fn test_demo_calls_every_procedure_once() {
    let server = MockServer::start().await;

    let mut file = Record::new();
    file.insert("filename".to_string(), Value::from("PyRedstone-0.1.tar.gz"));
    file.insert("packagetype".to_string(), Value::from("sdist"));
    let mut data = Record::new();
    data.insert("name".to_string(), Value::from("PyRedstone"));
    data.insert("version".to_string(), Value::from("0.1"));

    mount_procedure(&server, "list_packages", Value::from(vec!["PyRedstone", "spam"])).await;
    mount_procedure(&server, "package_releases", Value::from(vec!["0.1"])).await;
    mount_procedure(
        &server,
        "package_roles",
        Value::Array(vec![Value::from(vec!["Owner", "larz60"])]),
    )
    .await;
    mount_procedure(
        &server,
        "user_packages",
        Value::Array(vec![Value::from(vec!["Owner", "PyRedstone"])]),
    )
    .await;
    mount_procedure(
        &server,
        "release_downloads",
        Value::Array(vec![Value::Array(vec![
            Value::from("PyRedstone-0.1.tar.gz"),
            Value::Int(0),
        ])]),
    )
    .await;
    mount_procedure(&server, "release_urls", Value::Array(vec![Value::Struct(file)])).await;
    mount_procedure(&server, "release_data", Value::Struct(data)).await;
    mount_procedure(&server, "search", Value::Array(vec![])).await;
    mount_procedure(
        &server,
        "browse",
        Value::Array(vec![Value::from(vec!["numpy", "1.26.0"])]),
    )
    .await;
    mount_procedure(&server, "changelog", Value::Array(vec![])).await;
    mount_procedure(&server, "changelog_last_serial", Value::Int(100)).await;
    mount_procedure(&server, "changelog_since_serial", Value::Array(vec![])).await;

    let ctx = test_context(&server);
    let command = Commands::Demo {
        package: "PyRedstone".to_string(),
        delay_ms: 0,
    };
    dispatch_command(command, &ctx).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 12);
    let since_serial = requests
        .iter()
        .map(|request| String::from_utf8_lossy(&request.body).into_owned())
        .find(|body| body.contains("<methodName>changelog_since_serial</methodName>"))
        .unwrap();
    assert!(since_serial.contains("<int>90</int>"));
}

#[tokio::test]
async fn test_demo_skips_release_steps_without_releases() {
    let server = MockServer::start().await;

    mount_procedure(&server, "list_packages", Value::Array(vec![])).await;
    mount_procedure(&server, "package_releases", Value::Array(vec![])).await;
    mount_procedure(&server, "package_roles", Value::Array(vec![])).await;
    mount_procedure(&server, "browse", Value::Array(vec![])).await;
    mount_procedure(&server, "changelog", Value::Array(vec![])).await;
    mount_procedure(&server, "changelog_last_serial", Value::Int(5)).await;
    mount_procedure(&server, "changelog_since_serial", Value::Array(vec![])).await;

    let ctx = test_context(&server);
    demo::execute("Nothing", std::time::Duration::ZERO, &ctx)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 7);
}
