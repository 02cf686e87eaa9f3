use crate::config::GeneratorConfig;
use crate::core::extract::PdfTextExtractor;
use crate::core::gemini::GeminiClient;
use crate::core::text::{build_context, char_len, clean_text, split_sentences};
use crate::domain::model::{ExtractedDocument, Mcq, PreparedText};
use crate::domain::ports::{ConfigProvider, Pipeline, QuestionGenerator, TextExtractor};
use crate::utils::error::{McqError, Result};
use std::path::Path;

pub struct McqPipeline<E: TextExtractor, G: QuestionGenerator, C: ConfigProvider> {
    extractor: E,
    generator: G,
    config: C,
}

impl<E: TextExtractor, G: QuestionGenerator, C: ConfigProvider> McqPipeline<E, G, C> {
    pub fn new(extractor: E, generator: G, config: C) -> Self {
        Self {
            extractor,
            generator,
            config,
        }
    }
}

impl McqPipeline<PdfTextExtractor, GeminiClient<GeneratorConfig>, GeneratorConfig> {
    /// The production wiring: `pdf-extract` in, Gemini out.
    pub fn from_config(config: GeneratorConfig) -> Self {
        Self::new(
            PdfTextExtractor::new(),
            GeminiClient::new(config.clone()),
            config,
        )
    }
}

#[async_trait::async_trait]
impl<E: TextExtractor, G: QuestionGenerator, C: ConfigProvider> Pipeline for McqPipeline<E, G, C> {
    async fn extract(&self, path: &Path) -> Result<ExtractedDocument> {
        self.extractor.extract(path).await
    }

    async fn prepare(&self, document: &ExtractedDocument) -> Result<PreparedText> {
        let cleaned = clean_text(&document.text);
        let length = char_len(&cleaned);
        tracing::debug!("Cleaned text: {} -> {} chars", char_len(&document.text), length);

        if length < self.config.min_text_length() {
            return Err(McqError::InsufficientText {
                length,
                minimum: self.config.min_text_length(),
            });
        }

        let context = build_context(
            &cleaned,
            self.config.max_context_chars(),
            self.config.sentence_boundary(),
        );
        let sentence_count = split_sentences(&context).len();

        Ok(PreparedText {
            cleaned,
            context,
            sentence_count,
        })
    }

    async fn generate(&self, prepared: &PreparedText, num_questions: usize) -> Result<Vec<Mcq>> {
        self.generator.generate(&prepared.context, num_questions).await
    }
}
