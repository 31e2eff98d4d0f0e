//! End-to-end enrichment runs with both services mocked.
//!
//! Each scenario wires the real Notion and Anthropic clients into the
//! workflow. Call counts are enforced through `Mock::expect`, verified when
//! the mock servers drop.

use lexicon_core::{EnrichmentWorkflow, ItemOutcome, SkipReason, WorkflowConfig};
use lexicon_providers::{AnthropicEnricher, NotionClient};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DATABASE_ID: &str = "vocab";

struct Services {
    notion: MockServer,
    anthropic: MockServer,
}

impl Services {
    async fn start() -> Self {
        Self {
            notion: MockServer::start().await,
            anthropic: MockServer::start().await,
        }
    }

    fn workflow(&self) -> EnrichmentWorkflow<NotionClient, AnthropicEnricher> {
        let notion = NotionClient::new("secret_notion".to_string(), DATABASE_ID.to_string())
            .with_base_url(self.notion.uri());
        let enricher =
            AnthropicEnricher::new("sk-test".to_string()).with_base_url(self.anthropic.uri());
        let config = WorkflowConfig {
            pacing: Duration::ZERO,
            ..WorkflowConfig::default()
        };
        EnrichmentWorkflow::new(notion, enricher, config)
    }

    async fn pending(&self, pages: Vec<Value>) {
        Mock::given(method("POST"))
            .and(path(format!("/databases/{DATABASE_ID}/query")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": pages,
                "has_more": false,
                "next_cursor": null
            })))
            .expect(1)
            .mount(&self.notion)
            .await;
    }
}

fn page(id: &str, word: &str) -> Value {
    let title = if word.is_empty() {
        json!([])
    } else {
        json!([{ "text": { "content": word } }])
    };
    json!({
        "id": id,
        "properties": {
            "Name": { "title": title },
            "Status": { "select": { "name": "Ready" } }
        }
    })
}

fn model_reply(word: &str) -> Value {
    let enrichment = json!({
        "brief_definition": format!("Definition of {word}."),
        "emotional_texture": "curious, bright",
        "contextual_examples": "Example 1: a\n\nExample 2: b\n\nExample 3: c"
    });
    json!({
        "content": [{ "type": "text", "text": format!("```json\n{enrichment:#}\n```") }]
    })
}

#[tokio::test]
async fn single_ready_word_is_enriched() {
    let services = Services::start().await;
    services.pending(vec![page("page-1", "serendipity")]).await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_string_contains("serendipity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply("serendipity")))
        .expect(1)
        .mount(&services.anthropic)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/pages/page-1"))
        .and(body_json(json!({
            "properties": {
                "Brief Definition": { "rich_text": [{ "text": { "content": "Definition of serendipity." } }] },
                "Emotional Texture": { "rich_text": [{ "text": { "content": "curious, bright" } }] },
                "Contextual Examples": { "rich_text": [{ "text": {
                    "content": "Example 1: a\n\nExample 2: b\n\nExample 3: c"
                } }] },
                "Status": { "select": { "name": "Enriched" } }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "page-1" })))
        .expect(1)
        .mount(&services.notion)
        .await;

    let summary = services.workflow().run().await;

    assert_eq!(summary.enriched, 1);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn no_pending_words_calls_nothing_else() {
    let services = Services::start().await;
    services.pending(Vec::new()).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply("unused")))
        .expect(0)
        .mount(&services.anthropic)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&services.notion)
        .await;

    let summary = services.workflow().run().await;

    assert_eq!(summary.total, 0);
    assert_eq!(summary.enriched, 0);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn empty_word_is_counted_failed_without_calls() {
    let services = Services::start().await;
    services.pending(vec![page("page-1", "")]).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply("unused")))
        .expect(0)
        .mount(&services.anthropic)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&services.notion)
        .await;

    let summary = services.workflow().run().await;

    assert_eq!(summary.failed, 1);
    assert_eq!(
        summary.outcomes[0].outcome,
        ItemOutcome::Skipped(SkipReason::EmptyWord)
    );
}

#[tokio::test]
async fn model_error_skips_item_and_run_continues() {
    let services = Services::start().await;
    services
        .pending(vec![page("page-1", "ephemeral"), page("page-2", "liminal")])
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("ephemeral"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&services.anthropic)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("liminal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply("liminal")))
        .expect(1)
        .mount(&services.anthropic)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/pages/page-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&services.notion)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/pages/page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "page-2" })))
        .expect(1)
        .mount(&services.notion)
        .await;

    let summary = services.workflow().run().await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.enriched, 1);
    assert_eq!(summary.failed, 1);
    assert!(matches!(
        summary.outcomes[0].outcome,
        ItemOutcome::Skipped(SkipReason::EnrichmentFailed(_))
    ));
}

#[tokio::test]
async fn malformed_model_output_is_counted_failed() {
    let services = Services::start().await;
    services.pending(vec![page("page-1", "ineffable")]).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "I cannot describe it." }]
        })))
        .expect(1)
        .mount(&services.anthropic)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&services.notion)
        .await;

    let summary = services.workflow().run().await;

    assert_eq!(summary.enriched, 0);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn failed_query_ends_run_as_no_work() {
    let services = Services::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/databases/{DATABASE_ID}/query")))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&services.notion)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&services.anthropic)
        .await;

    let summary = services.workflow().run().await;

    assert_eq!(summary.total, 0);
}
