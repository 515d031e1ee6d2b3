//! File text extraction.
//!
//! The [`FileTextExtractor`] turns an ingested [`SourceDocument`] into plain
//! text, dispatching on the [`DocumentKind`] resolved at ingestion: PDFs go
//! to the remote extraction service, images through local OCR, word
//! documents through the local docx walker, and plain text through a strict
//! UTF-8 decode.

mod docx;
mod ocr;
mod pdf_service;

pub use ocr::OcrEngine;
pub use pdf_service::PdfServiceClient;

use thiserror::Error;

use crate::config::ExtractionSettings;
use crate::domain::{DocumentKind, SourceDocument};

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document kind has no extraction route.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// Extraction nominally succeeded but produced no text.
    #[error("no text could be extracted from the file")]
    EmptyResult,

    /// The remote extraction service failed or returned an error payload.
    #[error("extraction service error: {0}")]
    RemoteService(String),

    /// Local file or process I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document bytes could not be parsed.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// The OCR engine failed.
    #[error("OCR error: {0}")]
    Ocr(String),
}

/// Result type for extraction operations.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Extracts plain text from ingested documents.
pub struct FileTextExtractor {
    pdf: PdfServiceClient,
    ocr: OcrEngine,
}

impl FileTextExtractor {
    /// Creates an extractor from the extraction settings.
    pub fn new(settings: &ExtractionSettings) -> Self {
        Self {
            pdf: PdfServiceClient::new(settings),
            ocr: OcrEngine::new(&settings.ocr_language),
        }
    }

    /// Extracts the plain text of a document.
    ///
    /// The only network call is the PDF route; every other kind is handled
    /// locally. OCR may legitimately return an empty string when an image
    /// carries no recognizable text; callers decide whether that is fatal.
    pub async fn extract(&self, document: &SourceDocument) -> ExtractionResult<String> {
        tracing::debug!(
            file = %document.file_name,
            kind = ?document.kind(),
            size = document.size(),
            "Extracting text"
        );

        match document.kind() {
            DocumentKind::Pdf => self.pdf.extract(document).await,
            DocumentKind::Image => self.ocr.recognize(document).await,
            DocumentKind::WordDocument => docx::extract_text(&document.bytes),
            DocumentKind::PlainText => String::from_utf8(document.bytes.clone())
                .map_err(|_| ExtractionError::Parse("file is not valid UTF-8".to_string())),
            DocumentKind::Unsupported => Err(ExtractionError::UnsupportedType(
                document.mime_type.clone(),
            )),
        }
    }
}
