//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input, dispatched
//! statically from `main`.

use lexicon_config::{Config, Credentials};
use lexicon_providers::{AnthropicEnricher, NotionClient};
use tracing::info;

mod check;
mod enrich;
mod info;
mod init;
mod review;
mod version;

pub use check::CheckStrategy;
pub use enrich::{EnrichInput, EnrichStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use review::{ReviewInput, ReviewStrategy};
pub use version::VersionStrategy;

const RULE: &str = "============================================================";

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

fn notion_client(config: &Config, api_key: String) -> NotionClient {
    NotionClient::new(api_key, config.notion.database_id.clone())
        .with_base_url(config.notion.base_url.clone())
        .with_api_version(config.notion.api_version.clone())
        .with_property_names(config.notion.properties.clone())
        .with_timeout(config.notion.timeout())
}

fn anthropic_enricher(config: &Config, api_key: String) -> AnthropicEnricher {
    AnthropicEnricher::new(api_key)
        .with_base_url(config.anthropic.base_url.clone())
        .with_api_version(config.anthropic.api_version.clone())
        .with_model(config.anthropic.model.clone())
        .with_max_tokens(config.anthropic.max_tokens)
        .with_timeout(config.anthropic.timeout())
        .with_prompt_context(config.prompt.clone())
}

/// Config plus both credentials; a missing credential is fatal.
fn load_runtime() -> anyhow::Result<(Config, Credentials)> {
    let config = Config::load()?;
    let credentials = Credentials::from_env()?;
    info!(
        "Using database {} with model {}",
        config.notion.database_id, config.anthropic.model
    );
    Ok((config, credentials))
}
