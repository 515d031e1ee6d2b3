//! Client for the remote PDF text-extraction service.
//!
//! The service accepts a multipart upload on `POST {base}/extract-pdf-text`
//! and answers `{"text": ...}` on success or `{"error": ...}` with a non-2xx
//! status on failure.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{ExtractionError, ExtractionResult};
use crate::config::ExtractionSettings;
use crate::domain::SourceDocument;

/// Success payload from the extraction service.
#[derive(Debug, Deserialize)]
struct ExtractResponse {
    text: String,
}

/// Error payload from the extraction service.
#[derive(Debug, Deserialize)]
struct ExtractErrorResponse {
    error: String,
}

/// HTTP client for the PDF extraction endpoint.
pub struct PdfServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl PdfServiceClient {
    /// Creates a client from the extraction settings.
    pub fn new(settings: &ExtractionSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Uploads a PDF and returns the extracted text.
    pub async fn extract(&self, document: &SourceDocument) -> ExtractionResult<String> {
        let url = format!("{}/extract-pdf-text", self.base_url);

        let part = Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str("application/pdf")
            .map_err(|e| ExtractionError::RemoteService(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ExtractionError::RemoteService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ExtractErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => format!("HTTP {}", status.as_u16()),
            };
            tracing::warn!(%status, "PDF extraction service returned an error");
            return Err(ExtractionError::RemoteService(message));
        }

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::RemoteService(format!("malformed response: {}", e)))?;

        Ok(body.text)
    }
}
