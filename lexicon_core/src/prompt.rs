//! Enrichment prompt template.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Who the enrichment is written for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptContext {
    /// How the learner is referred to in the prompt.
    #[serde(default = "PromptContext::default_learner")]
    pub learner: String,
    /// One clause describing the learner, completing "... who {background}".
    #[serde(default = "PromptContext::default_background")]
    pub background: String,
    /// Domains the examples should be drawn from.
    #[serde(default = "PromptContext::default_focus")]
    pub focus: String,
}

impl PromptContext {
    fn default_learner() -> String {
        "the learner".to_string()
    }

    fn default_background() -> String {
        "works in design and regularly listens to design/business podcasts".to_string()
    }

    fn default_focus() -> String {
        "design, UX, product development, and creative work".to_string()
    }
}

impl Default for PromptContext {
    fn default() -> Self {
        Self {
            learner: Self::default_learner(),
            background: Self::default_background(),
            focus: Self::default_focus(),
        }
    }
}

/// Build the single user message sent to the model.
///
/// Existing metadata lines are included only when non-empty. The output is
/// deterministic for a given input.
#[must_use]
pub fn build_prompt(
    word: &str,
    existing_definition: &str,
    existing_texture: &str,
    context: &PromptContext,
) -> String {
    let PromptContext {
        learner,
        background,
        focus,
    } = context;

    let mut existing = String::new();
    if !existing_definition.is_empty() {
        let _ = writeln!(existing, "Existing definition: {existing_definition}");
    }
    if !existing_texture.is_empty() {
        let _ = writeln!(existing, "Existing emotional texture: {existing_texture}");
    }

    format!(
        r#"You are helping enrich a personal vocabulary database for {learner}, who {background}.

Word: "{word}"

Your task: Generate enrichment for this vocabulary word that is:
1. Contextually relevant to {focus}
2. Uses examples from professional scenarios, podcasts, or everyday work contexts
3. Clear and memorable

{existing}
Please provide:
1. **Brief Definition**: A concise, clear definition (1-2 sentences max)
2. **Emotional Texture**: 2-3 synonyms or related feeling words (comma-separated)
3. **Contextual Examples**: 3 distinct examples showing how this word appears in these contexts. Each example should be 1-2 sentences and demonstrate real-world usage.

Format your response as JSON:
{{
  "brief_definition": "...",
  "emotional_texture": "...",
  "contextual_examples": "Example 1: ...\n\nExample 2: ...\n\nExample 3: ..."
}}

Make the examples engaging, specific, and relevant to {learner}'s interests in {focus}."#
    )
}
