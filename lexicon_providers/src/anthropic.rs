use async_trait::async_trait;
use lexicon_core::{
    EnrichmentResult, Enricher, Error, PromptContext, Result, build_prompt, parse_enrichment,
};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::http::send_json;

const SERVICE: &str = "Anthropic";

/// Enrichment client for the Anthropic Messages API.
pub struct AnthropicEnricher {
    client: Client,
    api_key: String,
    base_url: String,
    api_version: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
    prompt: PromptContext,
}

impl AnthropicEnricher {
    pub fn new(api_key: String) -> Self {
        info!("Creating AnthropicEnricher");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.anthropic.com/v1".to_string(),
            api_version: "2023-06-01".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1024,
            timeout: Duration::from_secs(30),
            prompt: PromptContext::default(),
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
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_prompt_context(mut self, prompt: PromptContext) -> Self {
        self.prompt = prompt;
        self
    }

    /// One user message in, the first content block's text out.
    async fn complete(&self, prompt: &str, max_tokens: u32, timeout: Duration) -> Result<String> {
        let request = json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "messages": [
                { "role": "user", "content": prompt }
            ],
        });

        info!("Sending request to Anthropic API: model={}", self.model);

        let response: Value = send_json(
            SERVICE,
            self.client
                .post(format!("{}/messages", self.base_url))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", &self.api_version)
                .timeout(timeout)
                .json(&request),
        )
        .await?;

        if let Some(usage) = response.get("usage") {
            debug!(
                "Anthropic usage: input_tokens={}, output_tokens={}",
                usage["input_tokens"].as_u64().unwrap_or(0),
                usage["output_tokens"].as_u64().unwrap_or(0)
            );
        }

        response["content"][0]["text"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| Error::MalformedResponse {
                service: SERVICE,
                reason: "missing content[0].text".to_string(),
            })
    }

    /// Short round trip used by the preflight check.
    pub async fn ping(&self) -> Result<String> {
        self.complete(
            "Say 'API connection successful!' in a friendly way.",
            50,
            Duration::from_secs(10),
        )
        .await
        .inspect_err(|e| error!("Anthropic ping failed: {e}"))
    }
}

#[async_trait]
impl Enricher for AnthropicEnricher {
    async fn generate_enrichment(
        &self,
        word: &str,
        existing_definition: &str,
        existing_texture: &str,
    ) -> Result<EnrichmentResult> {
        let prompt = build_prompt(word, existing_definition, existing_texture, &self.prompt);

        let text = self
            .complete(&prompt, self.max_tokens, self.timeout)
            .await
            .inspect_err(|e| error!("Error calling Anthropic API for '{word}': {e}"))?;

        parse_enrichment(&text).inspect_err(|e| {
            error!("Error parsing model response for '{word}': {e}");
            error!("Raw response: {}", e.raw_response().unwrap_or(&text));
        })
    }
}
