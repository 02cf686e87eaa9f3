use crate::domain::model::ExtractedDocument;
use crate::domain::ports::TextExtractor;
use crate::utils::error::{McqError, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;

/// Page text via `pdf-extract`.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts from bytes already in memory.
    ///
    /// pdf-extract reports some font and content-stream problems with `println!`,
    /// so this does not keep stdout clean on its own. See [`Self::extract_quietly`].
    pub fn extract_bytes(bytes: &[u8]) -> Result<ExtractedDocument> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
            McqError::Extraction {
                message: e.to_string(),
            }
        })?;
        Ok(ExtractedDocument::from_pages(pages))
    }

    /// [`Self::extract_bytes`] with file descriptor 1 redirected to the null device,
    /// so nothing but the output document ever reaches stdout.
    pub fn extract_quietly(bytes: &[u8]) -> Result<ExtractedDocument> {
        // Only one redirect can exist per process; a second concurrent
        // extraction runs unsilenced rather than failing.
        let gag = match gag::Gag::stdout() {
            Ok(gag) => Some(gag),
            Err(e) => {
                tracing::debug!("stdout not silenced during extraction: {}", e);
                None
            }
        };

        let result = Self::extract_bytes(bytes);

        // anything pdf-extract left in the buffer goes to the null device too
        let _ = std::io::stdout().flush();
        drop(gag);
        result
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedDocument> {
        tracing::debug!("Reading PDF from {}", path.display());

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| McqError::Extraction {
                message: format!("{}: {}", path.display(), e),
            })?;

        tracing::debug!("Read {} bytes, extracting text", bytes.len());

        // pdf-extract is synchronous and can panic on hostile input; a panic
        // surfaces here as a JoinError instead of taking the process down.
        let document = tokio::task::spawn_blocking(move || Self::extract_quietly(&bytes))
            .await
            .map_err(|e| McqError::Extraction {
                message: format!("extractor aborted: {}", e),
            })??;

        tracing::info!(
            "📄 Extracted {} characters from {} page(s)",
            document.text.chars().count(),
            document.page_count()
        );

        Ok(document)
    }
}
