//! Integration tests for the summarization workflow.
//!
//! These drive the public [`WorkflowController`] API end to end with a stub
//! LLM provider. Detailed per-module logic lives in each module's own unit
//! tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use condense::app::{InputMethod, Session, WorkflowController, WorkflowStep};
use condense::config::{AiSettings, ExtractionSettings, MailSettings};
use condense::domain::{is_supported_file_type, SourceDocument, MAX_UPLOAD_BYTES};
use condense::providers::ai::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, LlmResult, TokenUsage,
};
use condense::providers::extraction::FileTextExtractor;
use condense::providers::mail::MailRelayClient;
use condense::services::{NotificationCategory, SummaryService};

// ============================================================================
// Stub provider
// ============================================================================

enum StubBehavior {
    Reply(String),
    Fail,
}

struct StubProvider {
    behavior: StubBehavior,
    calls: AtomicUsize,
}

impl StubProvider {
    fn replying(text: &str) -> Self {
        Self {
            behavior: StubBehavior::Reply(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            behavior: StubBehavior::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, _request: &CompletionRequest) -> LlmResult<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StubBehavior::Reply(text) => Ok(CompletionResponse {
                text: text.clone(),
                tokens_used: TokenUsage::default(),
            }),
            StubBehavior::Fail => Err(LlmError::Api {
                status: 500,
                message: "provider unavailable".to_string(),
            }),
        }
    }
}

fn controller_with(provider: Arc<StubProvider>) -> WorkflowController {
    let mail = MailSettings::default();
    WorkflowController::with_parts(
        FileTextExtractor::new(&ExtractionSettings::default()),
        SummaryService::with_provider(provider, AiSettings::default().temperature),
        MailRelayClient::new(&mail),
        mail.default_subject,
        mail.default_message,
    )
}

// ============================================================================
// Ingestion boundary
// ============================================================================

#[test]
fn supported_file_types() {
    for ext in ["pdf", "doc", "docx", "txt", "png", "jpg", "jpeg", "gif", "bmp", "tiff"] {
        assert!(is_supported_file_type(&format!("file.{}", ext)));
    }
    assert!(!is_supported_file_type("file.csv"));
    assert!(!is_supported_file_type("file.html"));
}

#[tokio::test]
async fn oversized_file_rejected_before_extraction() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let mut ctl = controller_with(provider.clone());

    // Even a supported type is rejected on size alone
    let doc = SourceDocument::new("huge.pdf", "application/pdf", vec![0; MAX_UPLOAD_BYTES + 1]);
    assert!(ctl.attach_file(doc).is_err());
    assert_eq!(ctl.session().step, WorkflowStep::Input);
    assert_eq!(provider.call_count(), 0);
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[tokio::test]
async fn text_mode_happy_path() {
    let provider = Arc::new(StubProvider::replying("Revenue grew ten percent."));
    let mut ctl = controller_with(provider.clone());

    ctl.set_input_method(InputMethod::Text);
    assert_eq!(ctl.session().step, WorkflowStep::Input);

    ctl.set_text_input("Q3 revenue grew 10%.");
    assert_eq!(ctl.session().step, WorkflowStep::Prompt);

    ctl.set_prompt("Summarize in one sentence");
    let summary = ctl.generate().await.unwrap().to_string();

    assert_eq!(summary, "Revenue grew ten percent.");
    assert_eq!(ctl.session().summary, "Revenue grew ten percent.");
    assert_eq!(ctl.session().step, WorkflowStep::Done);
    assert!(!ctl.session().is_generating);
    assert_eq!(provider.call_count(), 1);
    assert_eq!(
        ctl.notifications()
            .active_in_category(NotificationCategory::SummaryReady)
            .len(),
        1
    );
}

#[tokio::test]
async fn txt_file_extraction_is_byte_for_byte() {
    let provider = Arc::new(StubProvider::replying("A greeting."));
    let mut ctl = controller_with(provider);

    ctl.attach_file(SourceDocument::new(
        "hello.txt",
        "text/plain",
        b"Hello world".to_vec(),
    ))
    .unwrap();
    ctl.set_prompt("Summarize");

    ctl.generate().await.unwrap();
    assert_eq!(ctl.session().extracted_text, "Hello world");
    assert_eq!(ctl.session().step, WorkflowStep::Done);
}

#[tokio::test]
async fn provider_failure_allows_retry() {
    let provider = Arc::new(StubProvider::failing());
    let mut ctl = controller_with(provider.clone());

    ctl.set_input_method(InputMethod::Text);
    ctl.set_text_input("Some source material.");
    ctl.set_prompt("Summarize");

    assert!(ctl.generate().await.is_err());

    // Not stuck at Generating, summary untouched, one error notification
    assert_eq!(ctl.session().step, WorkflowStep::Prompt);
    assert!(!ctl.session().is_generating);
    assert!(ctl.session().summary.is_empty());
    assert_eq!(provider.call_count(), 1);
    assert_eq!(
        ctl.notifications()
            .active_in_category(NotificationCategory::SummaryFailed)
            .len(),
        1
    );
}

#[tokio::test]
async fn empty_extraction_aborts_before_summarization() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let mut ctl = controller_with(provider.clone());

    ctl.attach_file(SourceDocument::new(
        "blank.txt",
        "text/plain",
        b"   \n  ".to_vec(),
    ))
    .unwrap();
    ctl.set_prompt("Summarize");

    assert!(ctl.generate().await.is_err());
    assert_eq!(provider.call_count(), 0);
    assert_eq!(ctl.session().step, WorkflowStep::Prompt);
    assert_eq!(
        ctl.notifications()
            .active_in_category(NotificationCategory::ExtractionFailed)
            .len(),
        1
    );
}

#[tokio::test]
async fn reset_after_done_restores_fresh_session() {
    let provider = Arc::new(StubProvider::replying("A concise summary."));
    let mut ctl = controller_with(provider);

    ctl.set_input_method(InputMethod::Text);
    ctl.set_text_input("Material to summarize.");
    ctl.set_prompt("Summarize");
    ctl.generate().await.unwrap();
    assert_eq!(ctl.session().step, WorkflowStep::Done);
    assert!(!ctl.session().summary.is_empty());

    ctl.reset();
    assert_eq!(*ctl.session(), Session::default());
}

// ============================================================================
// Editing and export
// ============================================================================

#[tokio::test]
async fn editing_summary_keeps_the_step() {
    let provider = Arc::new(StubProvider::replying("First draft."));
    let mut ctl = controller_with(provider);

    ctl.set_input_method(InputMethod::Text);
    ctl.set_text_input("Material.");
    ctl.set_prompt("Summarize");
    ctl.generate().await.unwrap();

    ctl.edit_summary("Edited draft.");
    assert_eq!(ctl.session().summary, "Edited draft.");
    assert_eq!(ctl.session().step, WorkflowStep::Done);
}

#[tokio::test]
async fn export_round_trips_through_the_filesystem() {
    let provider = Arc::new(StubProvider::replying("Exported summary."));
    let mut ctl = controller_with(provider);

    ctl.set_input_method(InputMethod::Text);
    ctl.set_text_input("Material.");
    ctl.set_prompt("Summarize");
    ctl.generate().await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = ctl.export_summary(dir.path()).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "Exported summary.");
}

// ============================================================================
// Generate preconditions
// ============================================================================

#[tokio::test]
async fn generate_requires_prompt() {
    let provider = Arc::new(StubProvider::replying("unused"));
    let mut ctl = controller_with(provider.clone());

    ctl.set_input_method(InputMethod::Text);
    ctl.set_text_input("Material.");

    assert!(ctl.generate().await.is_err());
    assert_eq!(provider.call_count(), 0);

    // Supplying the prompt makes the same session generate cleanly
    ctl.set_prompt("Summarize");
    assert!(ctl.generate().await.is_ok());
}
