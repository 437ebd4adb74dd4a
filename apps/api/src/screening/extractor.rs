use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("The resume file could not be read: {0}")]
    CorruptFile(String),

    #[error("The resume contains no extractable text")]
    EmptyDocument,

    #[error("Text extraction timed out after {0:?}")]
    Timeout(Duration),
}

/// Turns an uploaded resume into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, content: Bytes) -> Result<String, ExtractionError>;
}

/// PDF extractor backed by `pdf-extract`. Parsing runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, content: Bytes) -> Result<String, ExtractionError> {
        if !content.starts_with(PDF_MAGIC) {
            return Err(ExtractionError::UnsupportedFormat(
                "expected a PDF document".to_string(),
            ));
        }

        let size = content.len();
        // pdf-extract can panic on malformed input; a panicked task is a corrupt file.
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&content).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExtractionError::CorruptFile(format!("PDF parser aborted: {e}")))?
        .map_err(ExtractionError::CorruptFile)?;

        let text = non_empty_text(text)?;
        debug!(bytes = size, chars = text.len(), "Extracted resume text");
        Ok(text)
    }
}

fn non_empty_text(text: String) -> Result<String, ExtractionError> {
    if text.trim().is_empty() {
        Err(ExtractionError::EmptyDocument)
    } else {
        Ok(text)
    }
}
