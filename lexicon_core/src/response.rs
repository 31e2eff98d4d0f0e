//! Recovering the enrichment object from free-form model text.

use regex::Regex;
use std::sync::LazyLock;

use crate::{EnrichmentResult, Error, Result};

// Opening fence with an optional language tag, then the body up to the
// closing fence or the end of the text (truncated output).
static FENCE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n?(.*?)(?:```|\z)").ok()
});

/// Strip a surrounding code fence if the text contains one.
///
/// Both a language-tagged fence (```` ```json ````) and a plain one are
/// recognised. Text without a fence is returned trimmed.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    FENCE
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map_or(text, |body| body.as_str())
        .trim()
}

/// Parse the model's text into an [`EnrichmentResult`].
///
/// Falls back to the outermost `{ ... }` span when the unfenced text carries
/// prose around the object.
pub fn parse_enrichment(text: &str) -> Result<EnrichmentResult> {
    let body = strip_code_fence(text);

    let first_error = match serde_json::from_str::<EnrichmentResult>(body) {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };

    if let Some(span) = object_span(body) {
        if span.len() < body.len() {
            if let Ok(result) = serde_json::from_str::<EnrichmentResult>(span) {
                return Ok(result);
            }
        }
    }

    Err(Error::Parse {
        reason: first_error.to_string(),
        raw: text.to_string(),
    })
}

fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
