// tests/http_exec.rs

mod common;
use crate::common::builders::SettingsBuilder;
use crate::common::http_stub::StubServer;
use crate::common::reporter::RecordingReporter;
use crate::common::with_timeout;

use std::collections::BTreeMap;
use std::error::Error;

use checkrun::config::SettingsMap;
use checkrun::exec::{DEFAULT_USER_AGENT, ExecutionResult, HttpClient};
use checkrun::report::Severity;
use checkrun::types::HttpMethod;

type TestResult = Result<(), Box<dyn Error>>;

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn empty_data_sends_get_with_default_user_agent() -> TestResult {
    let server = StubServer::serve_once(200, "pong").await?;
    let client = HttpClient::new(None)?;
    let reporter = RecordingReporter::new();

    let resp = with_timeout(client.request(
        &server.url,
        &SettingsMap::new(),
        &BTreeMap::new(),
        &BTreeMap::new(),
        None,
        &reporter,
    ))
    .await;

    assert!(resp.success);
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body, "pong");

    let request = server.request().await;
    assert!(request.starts_with("GET / "));
    assert!(request.to_lowercase().contains(&DEFAULT_USER_AGENT.to_lowercase()));
    Ok(())
}

#[tokio::test]
async fn non_empty_data_sends_substituted_form_post() -> TestResult {
    let server = StubServer::serve_once(201, "created").await?;
    let client = HttpClient::new(None)?;
    let reporter = RecordingReporter::new();
    let settings = SettingsBuilder::new()
        .set("field", "user")
        .set("name", "alice")
        .set("hdr", "X-Audit")
        .build();

    let resp = with_timeout(client.request(
        &server.url,
        &settings,
        &map(&[("{field}", "{name}")]),
        &map(&[("{hdr}", "on-{name}"), ("User-Agent", "checker/1.0")]),
        Some(HttpMethod::Get),
        &reporter,
    ))
    .await;

    assert!(resp.success);
    assert_eq!(resp.status_code, 201);

    let request = server.request().await;
    let lower = request.to_lowercase();
    assert!(request.starts_with("POST / "));
    assert!(lower.contains("x-audit: on-alice"));
    assert!(lower.contains("user-agent: checker/1.0"));
    assert!(!lower.contains("mozilla"));
    assert!(request.ends_with("user=alice"));
    Ok(())
}

#[tokio::test]
async fn post_hint_with_empty_data_sends_post() -> TestResult {
    let server = StubServer::serve_once(200, "").await?;
    let client = HttpClient::new(None)?;
    let reporter = RecordingReporter::new();

    let resp = with_timeout(client.request(
        &server.url,
        &SettingsMap::new(),
        &BTreeMap::new(),
        &BTreeMap::new(),
        Some(HttpMethod::Post),
        &reporter,
    ))
    .await;

    assert!(resp.success);
    assert!(server.request().await.starts_with("POST / "));
    Ok(())
}

#[tokio::test]
async fn error_statuses_are_still_successful_requests() -> TestResult {
    let server = StubServer::serve_once(404, "nope").await?;
    let client = HttpClient::new(None)?;
    let reporter = RecordingReporter::new();

    let resp = with_timeout(client.request(
        &server.url,
        &SettingsMap::new(),
        &BTreeMap::new(),
        &BTreeMap::new(),
        None,
        &reporter,
    ))
    .await;

    let result = ExecutionResult::from(resp);
    assert!(result.success);
    assert_eq!(result.status_code, Some(404));
    assert_eq!(result.output, "nope");
    Ok(())
}

#[tokio::test]
async fn unreachable_url_yields_status_zero_and_empty_body() -> TestResult {
    let client = HttpClient::new(None)?;
    let reporter = RecordingReporter::new();

    let resp = with_timeout(client.request(
        "http://127.0.0.1:1/",
        &SettingsMap::new(),
        &BTreeMap::new(),
        &BTreeMap::new(),
        None,
        &reporter,
    ))
    .await;

    assert!(!resp.success);
    assert_eq!(resp.status_code, 0);
    assert_eq!(resp.body, "");
    assert!(reporter.contains(Severity::Error, "Error making web request to URL"));
    Ok(())
}

#[tokio::test]
async fn unresolved_url_placeholder_is_reported_not_sent() -> TestResult {
    let client = HttpClient::new(None)?;
    let reporter = RecordingReporter::new();

    let resp = client
        .request(
            "http://{host}/",
            &SettingsMap::new(),
            &BTreeMap::new(),
            &BTreeMap::new(),
            None,
            &reporter,
        )
        .await;

    assert!(!resp.success);
    assert_eq!(resp.status_code, 0);
    assert!(reporter.contains(Severity::Error, "host"));
    Ok(())
}
