//! Generative-AI provider abstraction and implementations.

mod gemini;
mod traits;

pub use gemini::GeminiProvider;
pub use traits::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, LlmResult, Message, Role,
    TokenUsage,
};
