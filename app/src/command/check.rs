//! Preflight diagnostic for both upstream services.
//!
//! Independent of the enrichment run; a missing key is reported as that
//! service failing rather than aborting.

use lexicon_config::{ANTHROPIC_API_KEY, Config, Credentials, NOTION_API_KEY};

use super::{RULE, anthropic_enricher, notion_client};

/// Strategy for the preflight connection check.
///
/// Verifies both services independently before a real run and prints
/// remediation steps for each one that fails.
///
/// # Design
/// - Non-fatal: a missing key or failed call is reported, never returned
/// - Independent: the Anthropic check runs even when Notion fails
/// - Side-effect free: one single-entry query and one short ping
#[derive(Debug, Clone, Copy)]
pub struct CheckStrategy;

impl super::CommandStrategy for CheckStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let (notion_key, anthropic_key) = Credentials::partial_from_env();

        println!("{RULE}");
        println!("🧪 API Connection Test");
        println!("{RULE}");

        let notion_ok = check_notion(&config, notion_key).await;
        let anthropic_ok = check_anthropic(&config, anthropic_key).await;

        println!("\n{RULE}");
        if notion_ok && anthropic_ok {
            println!("✅ All tests passed! You're ready to run the enrichment.");
            println!("\nRun: lexicon enrich");
        } else {
            println!("❌ Some tests failed. Please check your API keys.");
            if !notion_ok {
                println!("\n📝 To fix Notion:");
                println!("   1. Get your key from: https://www.notion.so/my-integrations");
                println!("   2. Share your database with the integration");
                println!("   3. Set: export {NOTION_API_KEY}='your-key'");
            }
            if !anthropic_ok {
                println!("\n📝 To fix Anthropic:");
                println!("   1. Get your key from: https://console.anthropic.com/");
                println!("   2. Set: export {ANTHROPIC_API_KEY}='your-key'");
            }
        }
        println!("{RULE}");
        Ok(())
    }
}

async fn check_notion(config: &Config, api_key: Option<String>) -> bool {
    println!("🔍 Testing Notion API connection...");
    let Some(api_key) = api_key else {
        println!("   ❌ {NOTION_API_KEY} not set");
        return false;
    };

    match notion_client(config, api_key).probe().await {
        Ok(report) => {
            println!(
                "   ✅ Connected! Found {} entries in database",
                report.entries
            );
            if report.entries > 0 {
                let word = report.sample_word.as_deref().unwrap_or("N/A");
                println!("   📖 Sample word: '{word}'");
            }
            true
        }
        Err(e) => {
            println!("   ❌ Connection failed: {e}");
            false
        }
    }
}

async fn check_anthropic(config: &Config, api_key: Option<String>) -> bool {
    println!("\n🔍 Testing Anthropic API connection...");
    let Some(api_key) = api_key else {
        println!("   ❌ {ANTHROPIC_API_KEY} not set");
        return false;
    };

    match anthropic_enricher(config, api_key).ping().await {
        Ok(reply) => {
            println!("   ✅ Connected! The model says: {reply}");
            true
        }
        Err(e) => {
            println!("   ❌ Connection failed: {e}");
            false
        }
    }
}
