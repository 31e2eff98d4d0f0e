use tracing::debug;

use crate::{ConfigError, Result};

pub const NOTION_API_KEY: &str = "NOTION_API_KEY";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

/// API keys for both services.
#[derive(Clone)]
pub struct Credentials {
    pub notion_api_key: String,
    pub anthropic_api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("notion_api_key", &mask(&self.notion_api_key))
            .field("anthropic_api_key", &mask(&self.anthropic_api_key))
            .finish()
    }
}

/// Load a `.env` file from the working directory, if there is one.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env loaded: {e}"),
    }
}

impl Credentials {
    /// Both keys from the process environment. A missing or empty key is an
    /// error naming the variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        Ok(Self {
            notion_api_key: required(&lookup, NOTION_API_KEY)?,
            anthropic_api_key: required(&lookup, ANTHROPIC_API_KEY)?,
        })
    }

    /// Whatever keys are present, for diagnostics that report each one.
    pub fn partial_from_env() -> (Option<String>, Option<String>) {
        let lookup = |var: &'static str| std::env::var(var).ok();
        (
            required(&lookup, NOTION_API_KEY).ok(),
            required(&lookup, ANTHROPIC_API_KEY).ok(),
        )
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String>
where
    F: Fn(&'static str) -> Option<String>,
{
    lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingCredential { var })
}

/// `abcd...wxyz` for long keys, `***` otherwise.
#[must_use]
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}
