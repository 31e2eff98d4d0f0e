//! Translation of an enrichment into a partial page update.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{EnrichmentResult, Status};

/// Longest content accepted in a single rich-text segment.
pub const RICH_TEXT_LIMIT: usize = 2000;

/// Property updates keyed by property name.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A property value in the collection's update schema.
///
/// Serializes to the externally tagged shape the database service expects,
/// e.g. `{"select": {"name": "Enriched"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    RichText(Vec<RichText>),
    Select(SelectOption),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichText {
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub name: String,
}

impl PropertyValue {
    /// Rich text split into segments of at most [`RICH_TEXT_LIMIT`] chars.
    #[must_use]
    pub fn rich_text(content: &str) -> Self {
        let chars: Vec<char> = content.chars().collect();
        let segments = chars
            .chunks(RICH_TEXT_LIMIT)
            .map(|chunk| RichText {
                text: TextContent {
                    content: chunk.iter().collect(),
                },
            })
            .collect();
        Self::RichText(segments)
    }

    #[must_use]
    pub fn select(name: &str) -> Self {
        Self::Select(SelectOption {
            name: name.to_string(),
        })
    }
}

/// Names of the collection properties the tool reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyNames {
    pub word: String,
    pub brief_definition: String,
    pub emotional_texture: String,
    pub contextual_examples: String,
    pub status: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            word: "Name".to_string(),
            brief_definition: "Brief Definition".to_string(),
            emotional_texture: "Emotional Texture".to_string(),
            contextual_examples: "Contextual Examples".to_string(),
            status: "Status".to_string(),
        }
    }
}

/// Map an enrichment to property updates.
///
/// Empty content fields are omitted so blanks never overwrite existing
/// values. The status always moves to `Enriched`, even when every content
/// field is empty, so a word is not picked up again on the next run.
#[must_use]
pub fn to_properties(enrichment: &EnrichmentResult, names: &PropertyNames) -> PropertyMap {
    let mut properties = PropertyMap::new();

    let fields = [
        (&names.brief_definition, &enrichment.brief_definition),
        (&names.emotional_texture, &enrichment.emotional_texture),
        (&names.contextual_examples, &enrichment.contextual_examples),
    ];
    for (name, value) in fields {
        if !value.is_empty() {
            properties.insert(name.clone(), PropertyValue::rich_text(value));
        }
    }

    properties.insert(
        names.status.clone(),
        PropertyValue::select(Status::Enriched.as_str()),
    );

    properties
}
