#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod credentials;
mod error;
mod schema;

pub use credentials::{ANTHROPIC_API_KEY, Credentials, NOTION_API_KEY, load_dotenv, mask};
pub use error::{ConfigError, Result};
pub use schema::{AnthropicConfig, Config, NotionConfig, WorkflowSettings};
