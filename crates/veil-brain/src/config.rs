//! Configuration for the language-model backend.

use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::BrainError;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_API_URL: &str = "https://api.x.ai";

/// Default model name.
pub const DEFAULT_MODEL: &str = "grok-4-1-fast";

/// Configuration for [`ChatClient`](crate::ChatClient).
#[derive(Debug, Clone)]
pub struct BrainConfig {
    /// OpenAI-compatible API URL.
    pub api_url: String,

    /// API key for authentication.
    api_key: SecretString,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// HTTP timeout for a completion request.
    pub timeout: Duration,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: SecretString::from(String::new()),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.7),
            timeout: Duration::from_secs(60),
        }
    }
}

impl BrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `VEIL_AI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `VEIL_AI_API_URL` - API URL (default: https://api.x.ai)
    /// - `VEIL_AI_MODEL` - Model name (default: grok-4-1-fast)
    /// - `VEIL_AI_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `VEIL_AI_TEMPERATURE` - Temperature (default: 0.7)
    /// - `VEIL_AI_TIMEOUT_SECS` - HTTP timeout in seconds (default: 60)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("VEIL_AI_API_KEY")
            .map_err(|_| BrainError::Configuration("VEIL_AI_API_KEY not set".to_string()))?;

        let api_url =
            env::var("VEIL_AI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("VEIL_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = env::var("VEIL_AI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("VEIL_AI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        let timeout_secs = match env::var("VEIL_AI_TIMEOUT_SECS") {
            Ok(v) => v.parse::<u64>().map_err(|e| {
                BrainError::Configuration(format!("Invalid VEIL_AI_TIMEOUT_SECS: {}", e))
            })?,
            Err(_) => 60,
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: SecretString::from(api_key),
            model,
            max_tokens,
            temperature,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Create a new config builder.
    pub fn builder() -> BrainConfigBuilder {
        BrainConfigBuilder::default()
    }

    /// Get the API key (exposes the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    /// Chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_url)
    }
}

/// Builder for BrainConfig.
#[derive(Debug, Default)]
pub struct BrainConfigBuilder {
    config: BrainConfig,
}

impl BrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = SecretString::from(key.into());
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> BrainConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BrainConfig::default();

        assert_eq!(config.api_url, "https://api.x.ai");
        assert!(!config.has_api_key());
        assert_eq!(config.model, "grok-4-1-fast");
        assert_eq!(config.max_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(
            config.completions_url(),
            "https://api.x.ai/v1/chat/completions"
        );
    }

    #[test]
    fn test_builder_all_options() {
        let config = BrainConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com/")
            .model("gemini-2.0-flash")
            .max_tokens(512)
            .temperature(0.2)
            .timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.api_key(), "my-key");
        assert_eq!(config.api_url, "https://custom.api.com");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = BrainConfig::builder().api_key("sk-very-secret").build();
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_vars() {
            for var in [
                "VEIL_AI_API_KEY",
                "VEIL_AI_API_URL",
                "VEIL_AI_MODEL",
                "VEIL_AI_MAX_TOKENS",
                "VEIL_AI_TEMPERATURE",
                "VEIL_AI_TIMEOUT_SECS",
            ] {
                std::env::remove_var(var);
            }
        }

        // Missing API key should error
        clear_all_vars();
        match BrainConfig::from_env() {
            Err(BrainError::Configuration(msg)) => assert!(msg.contains("VEIL_AI_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Only API key set, defaults used
        clear_all_vars();
        std::env::set_var("VEIL_AI_API_KEY", "test-env-key");
        let config = BrainConfig::from_env().unwrap();
        assert_eq!(config.api_key(), "test-env-key");
        assert_eq!(config.api_url, "https://api.x.ai");
        assert_eq!(config.model, "grok-4-1-fast");
        assert_eq!(config.max_tokens, Some(1024));
        assert_eq!(config.timeout, Duration::from_secs(60));

        // All vars set
        clear_all_vars();
        std::env::set_var("VEIL_AI_API_KEY", "full-key");
        std::env::set_var("VEIL_AI_API_URL", "http://localhost:11434/");
        std::env::set_var("VEIL_AI_MODEL", "llama3");
        std::env::set_var("VEIL_AI_MAX_TOKENS", "256");
        std::env::set_var("VEIL_AI_TEMPERATURE", "0.1");
        std::env::set_var("VEIL_AI_TIMEOUT_SECS", "15");
        let config = BrainConfig::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:11434");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.max_tokens, Some(256));
        assert_eq!(config.temperature, Some(0.1));
        assert_eq!(config.timeout, Duration::from_secs(15));

        // Bad timeout is a configuration error
        clear_all_vars();
        std::env::set_var("VEIL_AI_API_KEY", "k");
        std::env::set_var("VEIL_AI_TIMEOUT_SECS", "soon");
        assert!(matches!(
            BrainConfig::from_env(),
            Err(BrainError::Configuration(_))
        ));

        clear_all_vars();
    }
}
