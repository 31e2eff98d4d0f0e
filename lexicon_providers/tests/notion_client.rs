//! Database client tests against a mock Notion API.

use lexicon_core::{Error, PropertyMap, PropertyValue, Status, VocabularyStore};
use lexicon_providers::{NotionClient, ProbeReport};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DATABASE_ID: &str = "db-123";

fn page(id: &str, word: &str, status: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Name": { "title": [{ "text": { "content": word } }] },
            "Status": { "select": { "name": status } }
        }
    })
}

fn client(server: &MockServer) -> NotionClient {
    NotionClient::new("secret".to_string(), DATABASE_ID.to_string()).with_base_url(server.uri())
}

#[tokio::test]
async fn query_pending_sends_ready_filter_and_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/databases/{DATABASE_ID}/query")))
        .and(header("authorization", "Bearer secret"))
        .and(header("notion-version", "2022-06-28"))
        .and(body_partial_json(json!({
            "filter": { "property": "Status", "select": { "equals": "Ready" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [page("page-1", "serendipity", "Ready"), page("page-2", "liminal", "Ready")],
            "has_more": false,
            "next_cursor": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let notion = client(&server);
    let Ok(pages) = notion.query_pending().await else {
        panic!("query should succeed");
    };

    let words: Vec<String> = pages
        .iter()
        .map(|page| notion.extract_fields(page).word)
        .collect();
    assert_eq!(words, ["serendipity", "liminal"]);
}

#[tokio::test]
async fn query_follows_pagination_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/databases/{DATABASE_ID}/query")))
        .and(body_partial_json(json!({ "start_cursor": "cursor-2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [page("page-2", "liminal", "Ready")],
            "has_more": false,
            "next_cursor": null
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/databases/{DATABASE_ID}/query")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [page("page-1", "serendipity", "Ready")],
            "has_more": true,
            "next_cursor": "cursor-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let Ok(pages) = client(&server).query_pending().await else {
        panic!("paginated query should succeed");
    };

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["id"], "page-1");
    assert_eq!(pages[1]["id"], "page-2");
}

#[tokio::test]
async fn query_by_status_filters_on_requested_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "filter": { "property": "Status", "select": { "equals": "Enriched" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let Ok(pages) = client(&server).query_by_status(&Status::Enriched).await else {
        panic!("query should succeed");
    };
    assert!(pages.is_empty());
}

#[tokio::test]
async fn query_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "object": "error",
            "code": "unauthorized",
            "message": "API token is invalid."
        })))
        .mount(&server)
        .await;

    let Err(err) = client(&server).query_pending().await else {
        panic!("401 must fail");
    };
    match err {
        Error::Status { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("unauthorized"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_query_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = client(&server).query_pending().await;
    assert!(matches!(result, Err(Error::MalformedResponse { .. })));
}

#[tokio::test]
async fn update_page_patches_properties() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/pages/page-1"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({
            "properties": {
                "Brief Definition": { "rich_text": [{ "text": { "content": "luck" } }] },
                "Status": { "select": { "name": "Enriched" } }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("page-1", "x", "Enriched")))
        .expect(1)
        .mount(&server)
        .await;

    let mut properties = PropertyMap::new();
    properties.insert(
        "Brief Definition".to_string(),
        PropertyValue::rich_text("luck"),
    );
    properties.insert("Status".to_string(), PropertyValue::select("Enriched"));

    let result = client(&server).update_page("page-1", &properties).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn update_page_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let result = client(&server)
        .update_page("missing", &PropertyMap::new())
        .await;
    assert!(matches!(result, Err(Error::Status { status: 404, .. })));
}

#[tokio::test]
async fn configured_timeout_bounds_database_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [] }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let notion = client(&server).with_timeout(Some(Duration::from_millis(50)));
    let result = notion.query_pending().await;
    assert!(matches!(result, Err(Error::Timeout { .. })));
}

#[tokio::test]
async fn probe_reports_sample_word() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({ "page_size": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [page("page-1", "serendipity", "Ready")]
        })))
        .mount(&server)
        .await;

    let Ok(report) = client(&server).probe().await else {
        panic!("probe should succeed");
    };
    assert_eq!(
        report,
        ProbeReport {
            entries: 1,
            sample_word: Some("serendipity".to_string()),
        }
    );
}
