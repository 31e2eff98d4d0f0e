//! Sequential enrichment run over every pending vocabulary item.

use std::time::Duration;
use tracing::{info, warn};

use crate::{Enricher, PropertyNames, VocabularyItem, VocabularyStore, to_properties};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Pause between consecutive items; not applied after the last one.
    pub pacing: Duration,
    pub property_names: PropertyNames,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::from_secs(1),
            property_names: PropertyNames::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    EmptyWord,
    EnrichmentFailed(String),
    UpdateFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Enriched,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// 1-based position in the query result.
    pub position: usize,
    pub word: String,
    pub outcome: ItemOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub enriched: usize,
    pub failed: usize,
    pub outcomes: Vec<ItemReport>,
}

impl RunSummary {
    fn record(&mut self, position: usize, word: &str, outcome: ItemOutcome) {
        match &outcome {
            ItemOutcome::Enriched => self.enriched += 1,
            ItemOutcome::Skipped(_) => self.failed += 1,
        }
        self.outcomes.push(ItemReport {
            position,
            word: word.to_string(),
            outcome,
        });
    }
}

pub struct EnrichmentWorkflow<S, E>
where
    S: VocabularyStore,
    E: Enricher,
{
    store: S,
    enricher: E,
    config: WorkflowConfig,
}

impl<S, E> EnrichmentWorkflow<S, E>
where
    S: VocabularyStore,
    E: Enricher,
{
    pub const fn new(store: S, enricher: E, config: WorkflowConfig) -> Self {
        Self {
            store,
            enricher,
            config,
        }
    }

    /// Fetch the pending items once, then process each in query order.
    ///
    /// Per-item failures are counted and never stop the run.
    pub async fn run(&self) -> RunSummary {
        println!("\n📖 Fetching words that need enrichment...");

        // The store logs a failed query; it ends the run like an empty one.
        let pages = self.store.query_pending().await.unwrap_or_default();

        let mut summary = RunSummary {
            total: pages.len(),
            ..RunSummary::default()
        };

        if pages.is_empty() {
            println!("✅ No words found with Status='Ready'. All caught up!");
            return summary;
        }

        println!("📝 Found {} word(s) to enrich\n", pages.len());
        info!("Processing {} pending item(s)", pages.len());

        for (index, page) in pages.iter().enumerate() {
            let position = index + 1;
            let item = self.store.extract_fields(page);
            let outcome = self.process_item(position, summary.total, &item).await;
            summary.record(position, &item.word, outcome);

            if position < summary.total && !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }
        }

        print_summary(&summary);
        summary
    }

    async fn process_item(
        &self,
        position: usize,
        total: usize,
        item: &VocabularyItem,
    ) -> ItemOutcome {
        let word = item.word.as_str();
        if word.is_empty() {
            println!("⚠️  Skipping entry {position}: No word found");
            warn!("Page {} has no word, skipping", item.page_id);
            return ItemOutcome::Skipped(SkipReason::EmptyWord);
        }

        println!("\n[{position}/{total}] Processing: '{word}'");
        println!("{THIN_RULE}");

        println!("   🤖 Asking the model for enrichment...");
        let enrichment = match self
            .enricher
            .generate_enrichment(word, &item.brief_definition, &item.emotional_texture)
            .await
        {
            Ok(enrichment) => enrichment,
            Err(e) => {
                println!("   ❌ Failed to generate enrichment for '{word}'");
                return ItemOutcome::Skipped(SkipReason::EnrichmentFailed(e.to_string()));
            }
        };

        println!(
            "   ✨ Definition: {}...",
            truncate_chars(or_na(&enrichment.brief_definition), 80)
        );
        println!("   💫 Texture: {}", or_na(&enrichment.emotional_texture));
        println!(
            "   📚 Examples: Generated {} examples",
            enrichment.example_count()
        );

        println!("   💾 Updating database...");
        let properties = to_properties(&enrichment, &self.config.property_names);
        match self.store.update_page(&item.page_id, &properties).await {
            Ok(()) => {
                println!("   ✅ Successfully enriched '{word}'!");
                info!("Enriched '{}' ({} properties)", word, properties.len());
                ItemOutcome::Enriched
            }
            Err(e) => {
                println!("   ❌ Failed to update database for '{word}'");
                ItemOutcome::Skipped(SkipReason::UpdateFailed(e.to_string()))
            }
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!("\n{RULE}");
    println!("📊 Enrichment Complete!");
    println!("   ✅ Successfully enriched: {} word(s)", summary.enriched);
    if summary.failed > 0 {
        println!("   ❌ Failed: {} word(s)", summary.failed);
    }
    println!("{RULE}");
}

const fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

/// First `max` characters of `s`, never splitting a char.
fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(idx, _)| &s[..idx])
}
