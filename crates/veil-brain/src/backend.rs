//! Chat backend trait and the OpenAI-compatible HTTP implementation.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
};
use crate::config::BrainConfig;
use crate::error::BrainError;

/// Shape the caller expects the completion in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Free text.
    Text,
    /// A single JSON object.
    Json,
}

/// Something that turns a list of chat messages into a completion.
///
/// The prompt flows are written against this trait so they can run on any
/// provider, or on a scripted backend in tests.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run one completion and return the text of the first choice.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        format: OutputFormat,
    ) -> Result<String, BrainError>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}

/// A [`ChatBackend`] that talks to an OpenAI-compatible
/// `/v1/chat/completions` endpoint.
pub struct ChatClient {
    client: Client,
    config: BrainConfig,
}

impl ChatClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BrainConfig) -> Result<Self, BrainError> {
        if !config.has_api_key() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!("ChatClient initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`BrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(BrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        format: OutputFormat,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let url = self.config.completions_url();

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format: match format {
                OutputFormat::Json => Some(ResponseFormat::json_object()),
                OutputFormat::Text => None,
            },
        };

        debug!(model = %request.model, messages = request.messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| BrainError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(BrainError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(BrainError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        format: OutputFormat,
    ) -> Result<String, BrainError> {
        let completion = self.chat_completion(messages, format).await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BrainError::InvalidOutput("No choices in response".to_string()))?;

        if choice.finish_reason.as_deref() == Some("length") {
            warn!("Completion truncated by max_tokens");
        }

        choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| BrainError::InvalidOutput("Empty completion".to_string()))
    }

    fn name(&self) -> &str {
        "ChatClient"
    }
}
