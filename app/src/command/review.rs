use lexicon_config::{Config, ConfigError, Credentials, NOTION_API_KEY};
use lexicon_core::{Status, VocabularyStore};

use super::{RULE, notion_client};

/// Input parameters for the Review command strategy.
#[derive(Debug, Clone)]
pub struct ReviewInput {
    /// Show at most this many cards
    pub limit: Option<usize>,
}

/// Strategy for reviewing enriched words as flashcards.
///
/// # Design
/// - Read-only: queries `Status = Enriched` and never updates a page
/// - Notion only: the Anthropic key is not required
#[derive(Debug, Clone, Copy)]
pub struct ReviewStrategy;

impl super::CommandStrategy for ReviewStrategy {
    type Input = ReviewInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let (notion_key, _) = Credentials::partial_from_env();
        let api_key = notion_key.ok_or(ConfigError::MissingCredential {
            var: NOTION_API_KEY,
        })?;

        let notion = notion_client(&config, api_key);
        println!("📡 Fetching enriched vocabulary...");
        let pages = notion.query_by_status(&Status::Enriched).await?;

        if pages.is_empty() {
            println!("⚠️  No words found with Status='Enriched'.");
            return Ok(());
        }

        let shown = input.limit.unwrap_or(pages.len()).min(pages.len());
        println!("✅ {} enriched word(s), showing {shown}\n", pages.len());

        for (index, page) in pages.iter().take(shown).enumerate() {
            let item = notion.extract_fields(page);
            println!("{RULE}");
            println!("[{}/{shown}] {}", index + 1, item.word);
            println!("{RULE}");
            print_field("✨ Definition", &item.brief_definition);
            print_field("💫 Texture", &item.emotional_texture);
            print_field("📚 Examples", &item.contextual_examples);
            println!();
        }

        Ok(())
    }
}

fn print_field(label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    println!("{label}:");
    for line in value.lines() {
        println!("   {line}");
    }
}
