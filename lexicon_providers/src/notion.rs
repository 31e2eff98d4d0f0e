use async_trait::async_trait;
use lexicon_core::{PropertyMap, PropertyNames, Result, Status, VocabularyItem, VocabularyStore};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::http::send_json;

const SERVICE: &str = "Notion";
const PAGE_SIZE: u32 = 100;

/// Database client for the vocabulary collection.
pub struct NotionClient {
    client: Client,
    api_key: String,
    database_id: String,
    base_url: String,
    api_version: String,
    properties: PropertyNames,
    timeout: Option<Duration>,
}

/// Result of the preflight query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub entries: usize,
    pub sample_word: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

impl NotionClient {
    pub fn new(api_key: String, database_id: String) -> Self {
        info!("Creating NotionClient for database {}", database_id);
        Self {
            client: Client::new(),
            api_key,
            database_id,
            base_url: "https://api.notion.com/v1".to_string(),
            api_version: "2022-06-28".to_string(),
            properties: PropertyNames::default(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    #[must_use]
    pub fn with_property_names(mut self, properties: PropertyNames) -> Self {
        self.properties = properties;
        self
    }

    /// Bound every database call. Unset means no timeout at all.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .bearer_auth(&self.api_key)
            .header("Notion-Version", &self.api_version);
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    async fn query_once(&self, body: &Value) -> Result<QueryResponse> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        send_json(SERVICE, self.authorized(self.client.post(url)).json(body)).await
    }

    /// Fetch one entry to confirm the key and database are usable.
    pub async fn probe(&self) -> Result<ProbeReport> {
        let response = self
            .query_once(&json!({ "page_size": 1 }))
            .await
            .inspect_err(|e| error!("Notion probe failed: {e}"))?;

        let sample_word = response
            .results
            .first()
            .map(|page| self.extract_fields(page).word)
            .filter(|word| !word.is_empty());

        Ok(ProbeReport {
            entries: response.results.len(),
            sample_word,
        })
    }
}

#[async_trait]
impl VocabularyStore for NotionClient {
    type Page = Value;

    /// Every page whose status select equals `status`, across all result
    /// pages, in the order the service returns them.
    async fn query_by_status(&self, status: &Status) -> Result<Vec<Value>> {
        let mut body = json!({
            "filter": {
                "property": self.properties.status,
                "select": { "equals": status.as_str() }
            },
            "page_size": PAGE_SIZE,
        });

        let mut pages = Vec::new();
        loop {
            let response = self
                .query_once(&body)
                .await
                .inspect_err(|e| error!("Error querying Notion database: {e}"))?;

            debug!("Notion query returned {} result(s)", response.results.len());
            pages.extend(response.results);

            match response.next_cursor {
                Some(cursor) if response.has_more => body["start_cursor"] = json!(cursor),
                _ => break,
            }
        }

        info!("Found {} page(s) with {}={}", pages.len(), self.properties.status, status);
        Ok(pages)
    }

    fn extract_fields(&self, page: &Value) -> VocabularyItem {
        let props = PageProperties::of(page);
        let names = &self.properties;
        VocabularyItem {
            page_id: page
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            word: props.text(&names.word, "title"),
            brief_definition: props.text(&names.brief_definition, "rich_text"),
            emotional_texture: props.text(&names.emotional_texture, "rich_text"),
            contextual_examples: props.text(&names.contextual_examples, "rich_text"),
            status: Status::from_name(props.option_name(&names.status)),
        }
    }

    async fn update_page(&self, page_id: &str, properties: &PropertyMap) -> Result<()> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        let body = json!({ "properties": properties });

        send_json::<IgnoredAny>(SERVICE, self.authorized(self.client.patch(url)).json(&body))
            .await
            .inspect_err(|e| error!("Error updating page {page_id}: {e}"))?;

        debug!("Updated page {} ({} properties)", page_id, properties.len());
        Ok(())
    }
}

/// Defaulting accessor over a page's `properties` object.
struct PageProperties<'a>(Option<&'a Value>);

impl<'a> PageProperties<'a> {
    fn of(page: &'a Value) -> Self {
        Self(page.get("properties"))
    }

    fn property(&self, name: &str) -> Option<&'a Value> {
        self.0.and_then(|props| props.get(name))
    }

    /// Concatenated text of every segment of a `title`/`rich_text` property.
    ///
    /// Long values are written as several segments and formatted spans split
    /// a value too, so reading only the first one would truncate it.
    fn text(&self, name: &str, kind: &str) -> String {
        self.property(name)
            .and_then(|prop| prop.get(kind))
            .and_then(Value::as_array)
            .map(|segments| segments.iter().filter_map(segment_text).collect())
            .unwrap_or_default()
    }

    /// Selected option of a `select` (or `status`) property.
    fn option_name(&self, name: &str) -> &'a str {
        let Some(prop) = self.property(name) else {
            return "";
        };
        ["select", "status"]
            .iter()
            .find_map(|kind| prop.get(*kind))
            .and_then(|option| option.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

fn segment_text(segment: &Value) -> Option<&str> {
    segment
        .get("text")
        .and_then(|text| text.get("content"))
        .or_else(|| segment.get("plain_text"))
        .and_then(Value::as_str)
}
