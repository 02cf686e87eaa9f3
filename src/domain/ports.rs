use crate::domain::model::{ExtractedDocument, Mcq, PreparedText};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Turns a file on disk into page text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<ExtractedDocument>;
}

/// Produces questions from prepared context.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, context: &str, num_questions: usize) -> Result<Vec<Mcq>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn model(&self) -> &str;
    fn api_key_env(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn structured_output(&self) -> bool;
    fn min_text_length(&self) -> usize;
    fn max_context_chars(&self) -> usize;
    fn sentence_boundary(&self) -> bool;
    fn default_questions(&self) -> usize;
    fn max_questions(&self) -> usize;

    /// The API key from the environment, trimmed; blank counts as missing.
    fn api_key(&self) -> Option<String> {
        std::env::var(self.api_key_env())
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<ExtractedDocument>;
    async fn prepare(&self, document: &ExtractedDocument) -> Result<PreparedText>;
    async fn generate(&self, prepared: &PreparedText, num_questions: usize) -> Result<Vec<Mcq>>;
}
