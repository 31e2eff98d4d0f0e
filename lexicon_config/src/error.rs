use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} environment variable not set\n   Set it with: export {var}='your-key-here'")]
    MissingCredential { var: &'static str },

    #[error("Cannot find home directory")]
    HomeDirNotFound,

    #[error("Config file already exists at: {}. Please edit it directly.", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid config file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
