// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use extractrs::config::settings::{BrowserSettings, Settings};
use extractrs::domain::models::outcome::Severity;
use extractrs::domain::models::project::{FieldSpec, ProjectConfig, ScheduleSpec};
use extractrs::pipeline::orchestrator::Extractor;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn project(name: &str, url: &str, fields: Vec<FieldSpec>) -> ProjectConfig {
    ProjectConfig {
        name: name.to_string(),
        url: url.to_string(),
        page_locator: None,
        fields,
        login_url: None,
        login_data: vec![],
        submit_locator: None,
        output_dir: PathBuf::from("Uploads"),
        schedule: ScheduleSpec::Minutes(30),
    }
}

fn field(name: &str, locator: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        locator: locator.to_string(),
    }
}

fn extractor() -> Extractor {
    Extractor::new(Arc::new(Settings {
        browser: BrowserSettings::default(),
        projects: vec![],
    }))
}

#[tokio::test]
async fn static_extraction_assembles_records_by_match_position() {
    let server = MockServer::start().await;
    let html = r#"
        <html><body>
            <h1>Daily Digest</h1>
            <a href="/stories/1">First story</a>
            <a href="/stories/2">Second story</a>
        </body></html>
    "#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let project = project(
        "digest",
        &server.uri(),
        vec![field("title", "h1"), field("story", "a")],
    );
    let outcome = extractor().extract_data(&project).await;

    assert_eq!(outcome.status, Severity::Success);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0]["title"], json!("Daily Digest"));
    assert_eq!(
        outcome.records[0]["story"],
        json!({ "href": "/stories/1", "text": "First story" })
    );
    // The second record only carries the field that matched twice
    assert!(!outcome.records[1].contains_key("title"));
    assert_eq!(
        outcome.records[1]["story"],
        json!({ "href": "/stories/2", "text": "Second story" })
    );
}

#[tokio::test]
async fn field_without_matches_degrades_to_a_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>no headline here</p>"))
        .mount(&server)
        .await;

    let project = project("digest", &server.uri(), vec![field("title", "h1")]);
    let outcome = extractor().extract_data(&project).await;

    assert_eq!(outcome.status, Severity::Warning);
    assert!(outcome.records.is_empty());
    assert!(outcome.diagnostics["title"].contains("h1"));
}

#[tokio::test]
async fn invalid_project_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let project = project("empty", &server.uri(), vec![]);
    let outcome = extractor().extract_data(&project).await;

    assert_eq!(outcome.status, Severity::Error);
    assert!(outcome.diagnostics.contains_key("project"));
    // Dropping the server verifies the zero-request expectation
}

#[tokio::test]
async fn http_error_status_is_reported_as_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let project = project("digest", &server.uri(), vec![field("title", "h1")]);
    let outcome = extractor().extract_data(&project).await;

    assert_eq!(outcome.status, Severity::Error);
    assert!(outcome.diagnostics.contains_key("fetch"));
    assert!(outcome.records.is_empty());
}
