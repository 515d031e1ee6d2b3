//! Workflow controller.
//!
//! Owns the [`Session`] and sequences the collaborators: extraction (file
//! mode only), then summarization, strictly in order. Only one generation
//! is ever in flight per session; the action is disabled, not queued, while
//! one is outstanding. A failed run returns the session to the prompt step
//! so the user can retry; nothing is retried automatically.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::session::{InputMethod, Session, WorkflowStep};
use crate::config::Settings;
use crate::domain::{is_supported_file_type, SourceDocument, MAX_UPLOAD_BYTES};
use crate::providers::extraction::{ExtractionError, FileTextExtractor};
use crate::providers::mail::{render_summary_html, MailRelayClient, SendError};
use crate::services::{Notification, NotificationService, SummarizeError, SummaryService};

/// File name used by summary export.
const EXPORT_FILE_NAME: &str = "summary.txt";

/// Errors surfaced by workflow actions.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Missing or invalid user input, caught before any network activity.
    #[error("{0}")]
    Validation(String),

    /// Text extraction failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Summarization failed.
    #[error(transparent)]
    Summarization(#[from] SummarizeError),

    /// Sending the summary email failed.
    #[error(transparent)]
    Send(#[from] SendError),

    /// Writing the exported summary failed.
    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),
}

/// Result type for workflow actions.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Sequences the document-to-summary-to-email workflow.
pub struct WorkflowController {
    session: Session,
    extractor: FileTextExtractor,
    summarizer: SummaryService,
    mailer: MailRelayClient,
    notifications: NotificationService,
    default_subject: String,
    default_message: String,
}

impl WorkflowController {
    /// Creates a controller wired from the application settings.
    pub fn new(settings: &Settings) -> Self {
        Self::with_parts(
            FileTextExtractor::new(&settings.extraction),
            SummaryService::from_settings(&settings.ai),
            MailRelayClient::new(&settings.mail),
            settings.mail.default_subject.clone(),
            settings.mail.default_message.clone(),
        )
    }

    /// Creates a controller from explicit collaborators (used by tests).
    pub fn with_parts(
        extractor: FileTextExtractor,
        summarizer: SummaryService,
        mailer: MailRelayClient,
        default_subject: String,
        default_message: String,
    ) -> Self {
        Self {
            session: Session::default(),
            extractor,
            summarizer,
            mailer,
            notifications: NotificationService::new(),
            default_subject,
            default_message,
        }
    }

    /// Read access to the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read access to the notification queue.
    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    /// Mutable access to the notification queue (dismiss, cleanup).
    pub fn notifications_mut(&mut self) -> &mut NotificationService {
        &mut self.notifications
    }

    /// Switches between file and pasted-text input.
    pub fn set_input_method(&mut self, method: InputMethod) {
        self.session.input_method = method;
    }

    /// Accepts an uploaded file, advancing to the prompt step.
    ///
    /// Unsupported types and oversized files are rejected with a
    /// user-visible error; the step does not advance.
    pub fn attach_file(&mut self, document: SourceDocument) -> WorkflowResult<()> {
        if !is_supported_file_type(&document.file_name) {
            return Err(self.validation_failure(
                "Unsupported file type. Please upload PDF, DOCX, TXT, or an Image.".to_string(),
            ));
        }
        if document.exceeds_size_limit() {
            return Err(self.validation_failure(format!(
                "File size must be less than {} MB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        self.notifications
            .notify(Notification::file_accepted(&document.file_name));
        self.session.document = Some(document);
        if self.session.step == WorkflowStep::Input {
            self.session.step = WorkflowStep::Prompt;
        }
        Ok(())
    }

    /// Stores pasted text, advancing to the prompt step once text exists.
    pub fn set_text_input(&mut self, text: impl Into<String>) {
        self.session.text_input = text.into();
        if self.session.input_method == InputMethod::Text
            && !self.session.text_input.trim().is_empty()
            && self.session.step == WorkflowStep::Input
        {
            self.session.step = WorkflowStep::Prompt;
        }
    }

    /// Stores the user's summarization instruction.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.session.custom_prompt = prompt.into();
    }

    /// Runs extraction (file mode) and summarization, sequentially.
    ///
    /// On success the session lands on [`WorkflowStep::Done`] with the
    /// summary stored. On any failure the generating flag clears, the step
    /// returns to [`WorkflowStep::Prompt`] for retry, and one error
    /// notification is emitted; text from a successful extraction is kept.
    pub async fn generate(&mut self) -> WorkflowResult<&str> {
        if self.session.is_generating {
            return Err(WorkflowError::Validation(
                "A summary is already being generated".to_string(),
            ));
        }
        match self.session.input_method {
            InputMethod::File if self.session.document.is_none() => {
                return Err(self.validation_failure("Please upload a file".to_string()));
            }
            InputMethod::Text if self.session.text_input.trim().is_empty() => {
                return Err(
                    self.validation_failure("Please enter some text to summarize".to_string())
                );
            }
            _ => {}
        }
        if self.session.custom_prompt.trim().is_empty() {
            return Err(self.validation_failure("Please enter a prompt".to_string()));
        }

        self.session.is_generating = true;
        self.session.step = WorkflowStep::Generating;

        let result = self.run_generation().await;
        self.session.is_generating = false;

        match result {
            Ok(summary) => {
                self.session.summary = summary;
                self.session.step = WorkflowStep::Done;
                self.notifications.notify(Notification::summary_ready());
                Ok(&self.session.summary)
            }
            Err(error) => {
                // Decision D1: a failed run returns to the prompt step.
                self.session.step = WorkflowStep::Prompt;
                tracing::warn!(%error, "Generation failed");
                let notification = match &error {
                    WorkflowError::Extraction(e) => Notification::extraction_failed(&e.to_string()),
                    other => Notification::summary_failed(&other.to_string()),
                };
                self.notifications.notify(notification);
                Err(error)
            }
        }
    }

    async fn run_generation(&mut self) -> WorkflowResult<String> {
        let text = match self.session.input_method {
            InputMethod::File => {
                // Preconditions guarantee the document is present
                let document = self
                    .session
                    .document
                    .as_ref()
                    .ok_or_else(|| WorkflowError::Validation("Please upload a file".to_string()))?;

                let extracted = self.extractor.extract(document).await?;
                self.session.extracted_text = extracted.clone();

                if extracted.trim().is_empty() {
                    return Err(ExtractionError::EmptyResult.into());
                }
                extracted
            }
            InputMethod::Text => self.session.text_input.trim().to_string(),
        };

        let summary = self
            .summarizer
            .summarize(&text, &self.session.custom_prompt)
            .await?;
        Ok(summary)
    }

    /// Replaces the summary text; editing never changes the step.
    pub fn edit_summary(&mut self, summary: impl Into<String>) {
        self.session.summary = summary.into();
    }

    /// Writes the current summary to `summary.txt` in the given directory.
    pub fn export_summary(&self, directory: &Path) -> WorkflowResult<PathBuf> {
        if self.session.summary.is_empty() {
            return Err(WorkflowError::Validation(
                "There is no summary to export".to_string(),
            ));
        }
        let path = directory.join(EXPORT_FILE_NAME);
        std::fs::write(&path, &self.session.summary)?;
        tracing::info!(path = %path.display(), "Summary exported");
        Ok(path)
    }

    /// Emails the current summary through the relay.
    ///
    /// `subject` and `message` fall back to the configured defaults. The
    /// summary travels both as part of the plain message and as rendered
    /// HTML. Returns the number of recipients the relay accepted.
    pub async fn send_summary(
        &mut self,
        recipients: &[String],
        subject: Option<&str>,
        message: Option<&str>,
    ) -> WorkflowResult<usize> {
        if self.session.summary.is_empty() {
            return Err(self.validation_failure("There is no summary to share".to_string()));
        }

        let subject = subject.unwrap_or(&self.default_subject);
        let message = message.unwrap_or(&self.default_message);
        let text = format!("{}{}", message, self.session.summary);
        let html = render_summary_html(&self.session.summary);

        match self.mailer.send(recipients, subject, &text, &html).await {
            Ok(count) => {
                self.notifications.notify(Notification::email_sent(count));
                Ok(count)
            }
            Err(error) => {
                tracing::warn!(%error, "Email send failed");
                self.notifications
                    .notify(Notification::email_failed(&error.to_string()));
                Err(error.into())
            }
        }
    }

    /// Whether reset is currently offered (any step past input).
    pub fn can_reset(&self) -> bool {
        self.session.step >= WorkflowStep::Prompt
    }

    /// Discards all session state and returns to the input step.
    pub fn reset(&mut self) {
        self.session = Session::default();
        tracing::info!("Workflow reset");
    }

    fn validation_failure(&mut self, message: String) -> WorkflowError {
        self.notifications
            .notify(Notification::validation(&message));
        WorkflowError::Validation(message)
    }
}
