//! Ingested document types.
//!
//! A [`SourceDocument`] carries the raw bytes of an uploaded file together
//! with its declared MIME type and a [`DocumentKind`] resolved once at
//! ingestion. All downstream dispatch matches on the kind exhaustively
//! rather than re-inspecting MIME strings.

use serde::{Deserialize, Serialize};

/// Maximum accepted upload size (10 MiB), enforced before any extraction.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// File extensions accepted at the ingestion boundary.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "png", "jpg", "jpeg", "gif", "bmp", "tiff",
];

/// Returns the lowercased extension of a file name, or an empty string.
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Whether a file name carries one of the supported extensions.
pub fn is_supported_file_type(file_name: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&file_extension(file_name).as_str())
}

/// The extraction route for an ingested document.
///
/// Resolved once from the declared MIME type and file name; the order of the
/// checks mirrors the ingestion policy (PDF before image before word
/// processing before plain text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// PDF, delegated to the remote extraction service.
    Pdf,
    /// Raster image, run through local OCR.
    Image,
    /// DOC/DOCX word-processing document, extracted locally.
    WordDocument,
    /// Plain text, decoded as UTF-8 directly.
    PlainText,
    /// Anything else; extraction is rejected.
    Unsupported,
}

impl DocumentKind {
    /// Classifies a document from its MIME type and file name.
    pub fn classify(mime_type: &str, file_name: &str) -> Self {
        let mime = mime_type.to_ascii_lowercase();
        let name = file_name.to_ascii_lowercase();

        if mime == "application/pdf" {
            DocumentKind::Pdf
        } else if mime.contains("image") {
            DocumentKind::Image
        } else if mime.contains("document")
            || mime.contains("msword")
            || name.ends_with(".docx")
            || name.ends_with(".doc")
        {
            DocumentKind::WordDocument
        } else if mime == "text/plain" || name.ends_with(".txt") {
            DocumentKind::PlainText
        } else {
            DocumentKind::Unsupported
        }
    }
}

/// An ingested document owned by the session until reset.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// Original file name, including extension.
    pub file_name: String,
    /// Declared (or guessed) MIME type.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    kind: DocumentKind,
}

impl SourceDocument {
    /// Creates a document with an explicitly declared MIME type.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_type.into();
        let kind = DocumentKind::classify(&mime_type, &file_name);
        Self {
            file_name,
            mime_type,
            bytes,
            kind,
        }
    }

    /// Creates a document, guessing the MIME type from the file name.
    pub fn with_guessed_mime(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self::new(file_name, mime_type, bytes)
    }

    /// The extraction route resolved at ingestion.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Size of the raw contents in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the document exceeds the ingestion size cap.
    pub fn exceeds_size_limit(&self) -> bool {
        self.bytes.len() > MAX_UPLOAD_BYTES
    }

    /// Lowercased file extension.
    pub fn extension(&self) -> String {
        file_extension(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_accepted() {
        for ext in SUPPORTED_EXTENSIONS {
            let name = format!("report.{}", ext);
            assert!(is_supported_file_type(&name), "{} should be supported", ext);
        }
    }

    #[test]
    fn unsupported_extensions_rejected() {
        assert!(!is_supported_file_type("archive.zip"));
        assert!(!is_supported_file_type("notes.md"));
        assert!(!is_supported_file_type("binary.exe"));
        assert!(!is_supported_file_type("no_extension"));
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("Report.PDF"), "pdf");
        assert!(is_supported_file_type("Report.PDF"));
    }

    #[test]
    fn classify_pdf_by_mime() {
        assert_eq!(
            DocumentKind::classify("application/pdf", "deck.pdf"),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn classify_image_by_mime() {
        assert_eq!(
            DocumentKind::classify("image/png", "scan.png"),
            DocumentKind::Image
        );
        assert_eq!(
            DocumentKind::classify("image/jpeg", "photo.jpg"),
            DocumentKind::Image
        );
    }

    #[test]
    fn classify_word_document() {
        assert_eq!(
            DocumentKind::classify(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "notes.docx",
            ),
            DocumentKind::WordDocument
        );
        assert_eq!(
            DocumentKind::classify("application/msword", "legacy.doc"),
            DocumentKind::WordDocument
        );
        // Extension alone is enough when the MIME type is generic
        assert_eq!(
            DocumentKind::classify("application/octet-stream", "notes.docx"),
            DocumentKind::WordDocument
        );
    }

    #[test]
    fn classify_plain_text() {
        assert_eq!(
            DocumentKind::classify("text/plain", "transcript.txt"),
            DocumentKind::PlainText
        );
        assert_eq!(
            DocumentKind::classify("application/octet-stream", "transcript.txt"),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn classify_unsupported() {
        assert_eq!(
            DocumentKind::classify("application/zip", "archive.zip"),
            DocumentKind::Unsupported
        );
    }

    #[test]
    fn pdf_takes_precedence_over_extension_checks() {
        // A PDF MIME type wins even with a confusing file name
        assert_eq!(
            DocumentKind::classify("application/pdf", "export.txt"),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn guessed_mime_resolves_kind() {
        let doc = SourceDocument::with_guessed_mime("notes.txt", b"hello".to_vec());
        assert_eq!(doc.mime_type, "text/plain");
        assert_eq!(doc.kind(), DocumentKind::PlainText);
    }

    #[test]
    fn size_limit() {
        let small = SourceDocument::new("a.txt", "text/plain", vec![0; 64]);
        assert!(!small.exceeds_size_limit());

        let big = SourceDocument::new("b.txt", "text/plain", vec![0; MAX_UPLOAD_BYTES + 1]);
        assert!(big.exceeds_size_limit());
    }
}
