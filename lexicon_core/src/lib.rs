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

use async_trait::async_trait;
use std::sync::Arc;

pub mod error;
pub mod properties;
pub mod prompt;
pub mod response;
pub mod vocabulary;
pub mod workflow;

pub use error::{Error, Result};
pub use properties::{PropertyMap, PropertyNames, PropertyValue, to_properties};
pub use prompt::{PromptContext, build_prompt};
pub use response::{parse_enrichment, strip_code_fence};
pub use vocabulary::{EnrichmentResult, Status, VocabularyItem};
pub use workflow::{
    EnrichmentWorkflow, ItemOutcome, ItemReport, RunSummary, SkipReason, WorkflowConfig,
};

/// Read and partial-update access to the vocabulary collection.
///
/// `Page` is the raw document shape returned by the backing service; the
/// workflow turns each one into a [`VocabularyItem`] via `extract_fields`.
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    type Page: Send + Sync;

    async fn query_by_status(&self, status: &Status) -> Result<Vec<Self::Page>>;

    /// Items eligible for enrichment (`Status = Ready`).
    async fn query_pending(&self) -> Result<Vec<Self::Page>> {
        self.query_by_status(&Status::Ready).await
    }

    /// Never fails: absent fields come back as empty strings.
    fn extract_fields(&self, page: &Self::Page) -> VocabularyItem;

    async fn update_page(&self, page_id: &str, properties: &PropertyMap) -> Result<()>;
}

/// Single-turn content generation for one word.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn generate_enrichment(
        &self,
        word: &str,
        existing_definition: &str,
        existing_texture: &str,
    ) -> Result<EnrichmentResult>;
}

#[async_trait]
impl<T: VocabularyStore> VocabularyStore for Arc<T> {
    type Page = T::Page;

    async fn query_by_status(&self, status: &Status) -> Result<Vec<Self::Page>> {
        (**self).query_by_status(status).await
    }

    fn extract_fields(&self, page: &Self::Page) -> VocabularyItem {
        (**self).extract_fields(page)
    }

    async fn update_page(&self, page_id: &str, properties: &PropertyMap) -> Result<()> {
        (**self).update_page(page_id, properties).await
    }
}

#[async_trait]
impl<T: Enricher> Enricher for Arc<T> {
    async fn generate_enrichment(
        &self,
        word: &str,
        existing_definition: &str,
        existing_texture: &str,
    ) -> Result<EnrichmentResult> {
        (**self)
            .generate_enrichment(word, existing_definition, existing_texture)
            .await
    }
}
