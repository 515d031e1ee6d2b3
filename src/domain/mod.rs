//! Domain layer types for the condense summarizer.
//!
//! This module contains the core domain types used throughout the crate,
//! centered on the ingested document and its resolved kind.

mod document;

pub use document::{
    file_extension, is_supported_file_type, DocumentKind, SourceDocument, MAX_UPLOAD_BYTES,
    SUPPORTED_EXTENSIONS,
};
