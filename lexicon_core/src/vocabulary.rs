use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Workflow status held in the collection's select property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    Ready,
    Enriched,
    /// Any other select option, or none at all (empty string).
    #[default]
    Unset,
    Other(String),
}

impl Status {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ready => "Ready",
            Self::Enriched => "Enriched",
            Self::Unset => "",
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Ready" => Self::Ready,
            "Enriched" => Self::Enriched,
            "" => Self::Unset,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one vocabulary page taken at query time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyItem {
    pub page_id: String,
    pub word: String,
    pub brief_definition: String,
    pub emotional_texture: String,
    pub contextual_examples: String,
    pub status: Status,
}

/// Generated content for a single word.
///
/// Every field is optional in the model output; missing ones deserialize
/// to empty strings. A field given as a list of strings is joined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    #[serde(default, deserialize_with = "text_or_list::comma")]
    pub brief_definition: String,
    #[serde(default, deserialize_with = "text_or_list::comma")]
    pub emotional_texture: String,
    #[serde(default, deserialize_with = "text_or_list::paragraphs")]
    pub contextual_examples: String,
}

impl EnrichmentResult {
    /// Number of blank-line separated example blocks.
    #[must_use]
    pub fn example_count(&self) -> usize {
        self.contextual_examples
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .count()
    }
}

mod text_or_list {
    use super::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrList {
        Text(String),
        List(Vec<String>),
        Null(()),
    }

    fn join<'de, D>(deserializer: D, separator: &str) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match TextOrList::deserialize(deserializer)? {
            TextOrList::Text(text) => text,
            TextOrList::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
                .join(separator),
            TextOrList::Null(()) => String::new(),
        })
    }

    pub fn comma<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        join(deserializer, ", ")
    }

    pub fn paragraphs<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        join(deserializer, "\n\n")
    }
}
