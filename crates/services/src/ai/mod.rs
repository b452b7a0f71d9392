pub mod client;
pub mod config;
pub mod normalize;
pub mod prompts;

use async_trait::async_trait;

use crate::error::ApiError;

pub use client::HttpCompletionClient;
pub use config::{CompletionConfig, Provider};
pub use normalize::{normalize, repair_truncated_json, strip_code_fence};

/// A single text-completion request.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Request for a full learning plan on `topic`.
    #[must_use]
    pub fn plan(topic: &str) -> Self {
        Self {
            prompt: prompts::plan_prompt(topic),
            max_tokens: 2500,
            temperature: 0.7,
        }
    }

    /// Request for quiz questions about a step's content.
    #[must_use]
    pub fn quiz(step_content: &str) -> Self {
        Self {
            prompt: prompts::quiz_prompt(step_content),
            max_tokens: 1500,
            temperature: 0.3,
        }
    }
}

/// Text returned by the completion API.
///
/// `truncated` is set when the provider reports that it stopped at the token
/// limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub truncated: bool,
}

/// The completion API as seen by the services.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one completion. No retries.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the backend is disabled, the request fails, or
    /// the response carries no text.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ApiError>;
}
