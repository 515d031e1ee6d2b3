//! Local optical character recognition for images.
//!
//! Shells out to the `tesseract` executable with a fixed language model.
//! The image bytes are staged in a temporary file since tesseract reads
//! from a path.

use std::path::PathBuf;

use tokio::process::Command;

use super::{ExtractionError, ExtractionResult};
use crate::domain::SourceDocument;

/// Runs tesseract over image documents.
pub struct OcrEngine {
    language: String,
}

impl OcrEngine {
    /// Creates an engine with the given tesseract language code.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// Recognizes text in an image document.
    ///
    /// Returns an empty string, not an error, when the image carries no
    /// recognizable text.
    pub async fn recognize(&self, document: &SourceDocument) -> ExtractionResult<String> {
        let path = self.stage_file(document).await?;
        let result = self.run_tesseract(&path).await;
        // Best-effort cleanup of the staged image
        let _ = tokio::fs::remove_file(&path).await;
        result
    }

    async fn stage_file(&self, document: &SourceDocument) -> ExtractionResult<PathBuf> {
        let extension = document.extension();
        let file_name = format!("condense-ocr-{}.{}", uuid::Uuid::new_v4(), extension);
        let path = std::env::temp_dir().join(file_name);
        tokio::fs::write(&path, &document.bytes).await?;
        Ok(path)
    }

    async fn run_tesseract(&self, path: &PathBuf) -> ExtractionResult<String> {
        let output = Command::new("tesseract")
            .arg(path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractionError::Ocr(
                        "tesseract executable not found; install tesseract-ocr".to_string(),
                    )
                } else {
                    ExtractionError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(status = ?output.status, "tesseract exited with an error");
            return Err(ExtractionError::Ocr(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn staged_file_carries_image_extension() {
        let engine = OcrEngine::new("eng");
        let doc = SourceDocument::new("scan.png", "image/png", vec![1, 2, 3]);

        let path = engine.stage_file(&doc).await.unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert!(tokio::fs::metadata(&path).await.is_ok());

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
