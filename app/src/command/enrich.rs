use lexicon_core::{EnrichmentWorkflow, WorkflowConfig};
use tracing::info;

use super::{RULE, anthropic_enricher, load_runtime, notion_client};

/// Input parameters for the Enrich command strategy.
#[derive(Debug, Clone)]
pub struct EnrichInput {
    /// Optional model override
    pub model: Option<String>,
    /// Optional pacing override in milliseconds
    pub pacing_ms: Option<u64>,
}

/// Strategy for the main enrichment run.
///
/// Loads configuration and both credentials, then runs the workflow once
/// over every word with `Status = Ready`.
///
/// # Design
/// - Fail fast: a missing credential aborts before any network call
/// - Overrides: `--model` and `--pacing-ms` win over the config file
/// - Exit status: per-word failures are summarized, never turned into errors
#[derive(Debug, Clone, Copy)]
pub struct EnrichStrategy;

impl super::CommandStrategy for EnrichStrategy {
    type Input = EnrichInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        println!("🚀 Living Lexicon - Vocabulary Enrichment Tool");
        println!("{RULE}");

        let (mut config, credentials) = load_runtime()?;
        if let Some(model) = input.model {
            config.anthropic.model = model;
        }
        if let Some(pacing_ms) = input.pacing_ms {
            config.workflow.pacing_ms = pacing_ms;
        }

        let notion = notion_client(&config, credentials.notion_api_key);
        let enricher = anthropic_enricher(&config, credentials.anthropic_api_key);
        let workflow_config = WorkflowConfig {
            pacing: config.workflow.pacing(),
            property_names: config.notion.properties.clone(),
        };

        let summary = EnrichmentWorkflow::new(notion, enricher, workflow_config)
            .run()
            .await;

        info!(
            "Run finished: total={}, enriched={}, failed={}",
            summary.total, summary.enriched, summary.failed
        );
        Ok(())
    }
}
