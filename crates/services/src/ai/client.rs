use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::config::{CompletionConfig, Provider};
use crate::ai::{Completion, CompletionBackend, CompletionRequest};
use crate::error::ApiError;

/// `CompletionBackend` over HTTP, speaking either the Gemini or the
/// OpenAI-compatible chat format.
#[derive(Clone)]
pub struct HttpCompletionClient {
    client: Client,
    config: Option<CompletionConfig>,
}

impl HttpCompletionClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(CompletionConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<CompletionConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn complete_gemini(
        &self,
        config: &CompletionConfig,
        request: &CompletionRequest,
    ) -> Result<Completion, ApiError> {
        let url = format!(
            "{}/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        let payload = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                top_p: 0.8,
                top_k: 40,
            },
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        let body: GeminiResponse = response.json().await?;
        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or(ApiError::NoCandidates)?;
        let truncated = candidate.finish_reason.as_deref() == Some("MAX_TOKENS");
        let text = candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or(ApiError::NoCandidates)?;

        Ok(Completion { text, truncated })
    }

    async fn complete_openai(
        &self,
        config: &CompletionConfig,
        request: &CompletionRequest,
    ) -> Result<Completion, ApiError> {
        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: request.prompt.clone(),
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or(ApiError::NoCandidates)?;
        let truncated = choice.finish_reason.as_deref() == Some("length");
        let text = choice.message.content.ok_or(ApiError::NoCandidates)?;

        Ok(Completion { text, truncated })
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ApiError> {
        let config = self.config.as_ref().ok_or(ApiError::Disabled)?;

        let completion = match config.provider {
            Provider::Gemini => self.complete_gemini(config, request).await?,
            Provider::OpenAi => self.complete_openai(config, request).await?,
        };

        if completion.truncated {
            warn!(model = %config.model, "completion stopped at the token limit");
        }
        debug!(text = %completion.text, "completion text");
        Ok(completion)
    }
}

// ─── Gemini wire types ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

// ─── OpenAI-compatible wire types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_client_reports_disabled() {
        let client = HttpCompletionClient::new(None);
        assert!(!client.enabled());
        let err = client
            .complete(&CompletionRequest::plan("Chess"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Disabled));
    }

    #[test]
    fn gemini_request_uses_camel_case_generation_config() {
        let payload = GeminiRequest {
            contents: Vec::new(),
            generation_config: GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 2500,
                top_p: 0.8,
                top_k: 40,
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2500);
        assert_eq!(json["generationConfig"]["topK"], 40);
    }

    #[test]
    fn gemini_response_reads_finish_reason() {
        let body: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{}"}]},"finishReason":"MAX_TOKENS"}]}"#,
        )
        .unwrap();
        let candidate = &body.candidates[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("MAX_TOKENS"));
    }
}
