//! condense - A document summarization workflow engine
//!
//! This crate provides the core functionality for the condense summarizer:
//! document text extraction, AI summarization, and email sharing, sequenced
//! by an explicit workflow controller.

pub mod app;
pub mod config;
pub mod domain;
pub mod providers;
pub mod services;

pub use app::{Session, WorkflowController};
