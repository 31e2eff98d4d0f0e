use lexicon_core::{PromptContext, PropertyNames};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::{ConfigError, Result};

pub const DATABASE_ID_VAR: &str = "NOTION_DATABASE_ID";
pub const MODEL_VAR: &str = "LEXICON_MODEL";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub notion: NotionConfig,
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    #[serde(default)]
    pub workflow: WorkflowSettings,
    #[serde(default)]
    pub prompt: PromptContext,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct NotionConfig {
    #[serde(default = "NotionConfig::default_database_id")]
    pub database_id: String,
    #[serde(default = "NotionConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "NotionConfig::default_api_version")]
    pub api_version: String,
    /// Unset leaves database calls unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub properties: PropertyNames,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            database_id: Self::default_database_id(),
            base_url: Self::default_base_url(),
            api_version: Self::default_api_version(),
            timeout_secs: None,
            properties: PropertyNames::default(),
        }
    }
}

impl NotionConfig {
    fn default_database_id() -> String {
        "2932ab6ea09280f19ff4ecca6b020371".to_string()
    }

    fn default_base_url() -> String {
        "https://api.notion.com/v1".to_string()
    }

    fn default_api_version() -> String {
        "2022-06-28".to_string()
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AnthropicConfig {
    #[serde(default = "AnthropicConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "AnthropicConfig::default_api_version")]
    pub api_version: String,
    #[serde(default = "AnthropicConfig::default_model")]
    pub model: String,
    #[serde(default = "AnthropicConfig::default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "AnthropicConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            api_version: Self::default_api_version(),
            model: Self::default_model(),
            max_tokens: Self::default_max_tokens(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl AnthropicConfig {
    fn default_base_url() -> String {
        "https://api.anthropic.com/v1".to_string()
    }

    fn default_api_version() -> String {
        "2023-06-01".to_string()
    }

    fn default_model() -> String {
        "claude-sonnet-4-20250514".to_string()
    }

    const fn default_max_tokens() -> u32 {
        1024
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Delay between items in milliseconds.
    #[serde(default = "WorkflowSettings::default_pacing_ms")]
    pub pacing_ms: u64,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            pacing_ms: Self::default_pacing_ms(),
        }
    }
}

impl WorkflowSettings {
    const fn default_pacing_ms() -> u64 {
        1000
    }

    #[must_use]
    pub const fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or(ConfigError::HomeDirNotFound)?
            .join("lexicon"))
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/lexicon/config.json` if present, then apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::default_path()?)?;
        config.apply_overrides(|var| std::env::var(var).ok());
        Ok(config)
    }

    /// Defaults when `path` does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(database_id) = lookup(DATABASE_ID_VAR).filter(|v| !v.trim().is_empty()) {
            self.notion.database_id = database_id.trim().to_string();
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.trim().is_empty()) {
            self.anthropic.model = model.trim().to_string();
        }
    }

    pub fn create_config() -> Result<PathBuf> {
        let path = Self::default_path()?;
        Self::create_config_at(&path)?;

        println!("✅ Created config file at: {}", path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set NOTION_API_KEY and ANTHROPIC_API_KEY (environment or .env file)");
        println!("   2. Share your vocabulary database with the Notion integration");
        println!("   3. Run 'lexicon check' to verify both connections");
        println!("   4. Run 'lexicon enrich' to enrich words with Status = Ready");
        println!();
        println!("🔧 Configuration options:");
        println!("   - notion.database_id: the vocabulary database to enrich");
        println!("   - notion.properties: property names used in your database");
        println!("   - anthropic.model: model used for enrichment");
        println!("   - prompt: who the enrichment is written for");
        println!();
        Ok(path)
    }

    /// Write a template with every default spelled out. Never overwrites.
    pub fn create_config_at(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template =
            serde_json::to_string_pretty(&Self::default()).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        std::fs::write(path, template)?;
        Ok(())
    }
}
