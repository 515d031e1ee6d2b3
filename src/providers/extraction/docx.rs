//! Local text extraction for word-processing documents.
//!
//! A .docx file is a ZIP of XML parts; `docx-rs` exposes the parsed tree.
//! Text lives on the Paragraph -> Run -> Text path; runs within a paragraph
//! are concatenated and paragraphs are joined with newlines.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use super::{ExtractionError, ExtractionResult};

/// Extracts the plain text content of a DOC/DOCX payload.
pub fn extract_text(bytes: &[u8]) -> ExtractionResult<String> {
    let docx =
        read_docx(bytes).map_err(|e| ExtractionError::Parse(format!("docx parse error: {:?}", e)))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let text = paragraph_text(paragraph);
            if !text.trim().is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut runs = Vec::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for piece in &run.children {
                if let RunChild::Text(text) = piece {
                    runs.push(text.text.clone());
                }
            }
        }
    }
    runs.concat()
}
