//! Configuration types for mail-gw.

use std::time::Duration;

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.mail.gw";

/// Configuration for talking to the mail.gw API.
#[derive(Debug, Clone)]
pub struct MailGwConfig {
    /// Base URL of the API (e.g., "https://api.mail.gw").
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl MailGwConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the domain listing URL.
    pub fn domains_url(&self) -> String {
        format!("{}/domains", self.base_url)
    }

    /// Get the account registration URL.
    pub fn accounts_url(&self) -> String {
        format!("{}/accounts", self.base_url)
    }

    /// Get the URL of a single account.
    pub fn account_url(&self, id: &str) -> String {
        format!("{}/accounts/{}", self.base_url, urlencoding::encode(id))
    }

    /// Get the token issuing URL.
    pub fn token_url(&self) -> String {
        format!("{}/token", self.base_url)
    }

    /// Get the current-account URL.
    pub fn me_url(&self) -> String {
        format!("{}/me", self.base_url)
    }

    /// Get the inbox listing URL.
    pub fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url)
    }

    /// Get the URL of a single message.
    pub fn message_url(&self, id: &str) -> String {
        format!("{}/messages/{}", self.base_url, urlencoding::encode(id))
    }
}

impl Default for MailGwConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
