//! Session state for one workflow run.
//!
//! The session is the single mutable resource of a run. It is owned by the
//! [`WorkflowController`](super::WorkflowController) and mutated only
//! through its transition methods; there are no background writers.

use crate::domain::SourceDocument;

/// How the source text enters the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMethod {
    /// An uploaded file, run through extraction.
    #[default]
    File,
    /// Pasted text, used as-is.
    Text,
}

/// The four-stage workflow progress indicator.
///
/// Steps only advance forward; the sole way back is an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WorkflowStep {
    /// Waiting for a file or pasted text.
    #[default]
    Input,
    /// Input accepted; waiting for a prompt.
    Prompt,
    /// A generation run is in flight.
    Generating,
    /// A summary is available for editing, export, and sharing.
    Done,
}

impl WorkflowStep {
    /// The 1-based step number shown in the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            WorkflowStep::Input => 1,
            WorkflowStep::Prompt => 2,
            WorkflowStep::Generating => 3,
            WorkflowStep::Done => 4,
        }
    }
}

/// The complete mutable state of one workflow run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// File or pasted-text mode.
    pub input_method: InputMethod,
    /// Uploaded document, owned until reset.
    pub document: Option<SourceDocument>,
    /// Pasted text (text mode).
    pub text_input: String,
    /// Text produced by a successful file-mode extraction.
    pub extracted_text: String,
    /// The user's summarization instruction.
    pub custom_prompt: String,
    /// The generated summary; empty until a generation succeeds.
    pub summary: String,
    /// Current workflow step.
    pub step: WorkflowStep,
    /// Whether a generation run is in flight.
    pub is_generating: bool,
}

impl Session {
    /// Whether the session has usable input for its current method.
    pub fn has_input(&self) -> bool {
        match self.input_method {
            InputMethod::File => self.document.is_some(),
            InputMethod::Text => !self.text_input.trim().is_empty(),
        }
    }

    /// Whether the generate action is currently available.
    pub fn can_generate(&self) -> bool {
        self.has_input() && !self.custom_prompt.trim().is_empty() && !self.is_generating
    }
}
