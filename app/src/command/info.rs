use lexicon_config::{Config, Credentials, mask};

/// Prints the effective configuration with masked API keys.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let (notion_key, anthropic_key) = Credentials::partial_from_env();

        println!("=== lexicon Configuration ===\n");

        match Config::default_path() {
            Ok(path) if path.exists() => println!("Config file: {}", path.display()),
            Ok(path) => println!("Config file: {} (not found, using defaults)", path.display()),
            Err(e) => println!("Config file: unavailable ({e})"),
        }
        println!();

        println!("API Keys:");
        println!("  Notion: {}", masked_or_unset(notion_key.as_deref()));
        println!("  Anthropic: {}", masked_or_unset(anthropic_key.as_deref()));
        println!();

        println!("Notion:");
        println!("  Database ID: {}", config.notion.database_id);
        println!("  Base URL: {}", config.notion.base_url);
        println!("  API Version: {}", config.notion.api_version);
        match config.notion.timeout_secs {
            Some(secs) => println!("  Timeout: {secs}s"),
            None => println!("  Timeout: none"),
        }
        let names = &config.notion.properties;
        println!(
            "  Properties: word={:?}, definition={:?}, texture={:?}, examples={:?}, status={:?}",
            names.word,
            names.brief_definition,
            names.emotional_texture,
            names.contextual_examples,
            names.status
        );
        println!();

        println!("Anthropic:");
        println!("  Model: {}", config.anthropic.model);
        println!("  Max Tokens: {}", config.anthropic.max_tokens);
        println!("  Timeout: {}s", config.anthropic.timeout_secs);
        println!();

        println!("Workflow:");
        println!("  Pacing: {}ms", config.workflow.pacing_ms);
        println!();

        println!("Prompt:");
        println!("  Learner: {}", config.prompt.learner);
        println!("  Background: {}", config.prompt.background);
        println!("  Focus: {}", config.prompt.focus);

        Ok(())
    }
}

fn masked_or_unset(key: Option<&str>) -> String {
    key.map_or_else(|| "(not set)".to_string(), mask)
}
