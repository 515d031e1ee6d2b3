//! Summarization service.
//!
//! Wraps an [`LlmProvider`] with the fixed summarization contract: a
//! constant system instruction, the caller's free-form instruction, the
//! source text, and a low, deterministic-leaning temperature. One request,
//! one response, no retries, no streaming; the provider's text comes back
//! verbatim.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::AiSettings;
use crate::providers::ai::{CompletionRequest, GeminiProvider, LlmError, LlmProvider, Message};

/// Fixed system instruction for every summarization call.
pub const SYSTEM_INSTRUCTION: &str = "\
Act as an expert data understanding assistant.
- Summarize only based on the provided text.
- Do not add extra information.
- If insufficient data is provided, say \"insufficient data\".
";

/// Errors that can occur during summarization.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// No API key is configured; checked at call time, not startup.
    #[error("no AI API key configured")]
    MissingCredential,

    /// The underlying provider call failed.
    #[error("summarization provider failure: {0}")]
    Provider(#[from] LlmError),
}

/// Result type for summarization operations.
pub type SummarizeResult<T> = Result<T, SummarizeError>;

/// Generates summaries through a configured LLM provider.
pub struct SummaryService {
    provider: Option<Arc<dyn LlmProvider>>,
    temperature: f32,
}

impl SummaryService {
    /// Builds the service from the AI settings.
    ///
    /// A missing API key produces a service that fails with
    /// [`SummarizeError::MissingCredential`] on use.
    pub fn from_settings(settings: &AiSettings) -> Self {
        let provider = settings.api_key.as_ref().map(|key| {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(settings.timeout_secs))
                .build()
                .unwrap_or_default();

            let provider = match &settings.base_url {
                Some(base) => GeminiProvider::custom(base.clone(), key.clone(), &settings.model),
                None => GeminiProvider::new(key.clone(), &settings.model),
            };

            Arc::new(provider.with_client(client)) as Arc<dyn LlmProvider>
        });

        Self {
            provider,
            temperature: settings.temperature,
        }
    }

    /// Builds the service around an explicit provider.
    pub fn with_provider(provider: Arc<dyn LlmProvider>, temperature: f32) -> Self {
        Self {
            provider: Some(provider),
            temperature,
        }
    }

    /// Whether a provider is configured.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Summarizes `text` per the caller's `instruction`.
    ///
    /// The request is issued even when `text` is empty; the model is the
    /// one instructed to answer "insufficient data" in that case.
    pub async fn summarize(&self, text: &str, instruction: &str) -> SummarizeResult<String> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(SummarizeError::MissingCredential)?;

        let request = CompletionRequest::new(vec![Message::user(format!(
            "{}\n\n{}",
            instruction, text
        ))])
        .with_system_prompt(SYSTEM_INSTRUCTION)
        .with_temperature(self.temperature);

        tracing::info!(
            provider = provider.name(),
            model = provider.model(),
            text_len = text.len(),
            "Requesting summary"
        );

        let response = provider.complete(&request).await?;

        tracing::debug!(
            summary_len = response.text.len(),
            total_tokens = response.tokens_used.total_tokens,
            "Summary received"
        );

        Ok(response.text)
    }
}
