use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reasons surfaced at the client boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{service} request failed: {message}")]
    Request {
        service: &'static str,
        message: String,
    },

    #[error("{service} request timed out")]
    Timeout { service: &'static str },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} returned an unexpected payload: {reason}")]
    MalformedResponse {
        service: &'static str,
        reason: String,
    },

    #[error("could not parse enrichment JSON: {reason}")]
    Parse { reason: String, raw: String },
}

impl Error {
    /// Raw model text attached to a parse failure, if any.
    #[must_use]
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
