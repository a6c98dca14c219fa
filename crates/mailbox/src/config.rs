use std::env;
use std::time::Duration;

use mail_gw::{MailGwConfig, DEFAULT_BASE_URL};

use crate::MailboxError;

/// How long a mailbox lives before it is rotated.
pub const DEFAULT_LIFESPAN: Duration = Duration::from_secs(20 * 60);

/// How often the inbox is polled.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// How often the countdown is refreshed.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for the mailbox lifecycle.
#[derive(Debug, Clone)]
pub struct MailboxConfig {
    /// Provider API URL (default: https://api.mail.gw)
    pub api_url: String,
    /// Mailbox lifespan (default: 20 minutes)
    pub lifespan: Duration,
    /// Inbox poll interval (default: 3 seconds)
    pub poll_interval: Duration,
    /// Countdown refresh interval (default: 1 second)
    pub tick_interval: Duration,
    /// Delete the previous account on the provider when rotating
    pub release_on_rotate: bool,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            lifespan: DEFAULT_LIFESPAN,
            poll_interval: DEFAULT_POLL_INTERVAL,
            tick_interval: DEFAULT_TICK_INTERVAL,
            release_on_rotate: false,
        }
    }
}

impl MailboxConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional (with defaults):
    /// - `MAILGW_API_URL` - Default: https://api.mail.gw
    /// - `MAILBOX_LIFESPAN_MINUTES` - Default: 20
    /// - `MAILBOX_POLL_SECS` - Default: 3
    /// - `MAILBOX_RELEASE_ON_ROTATE` - Default: false
    pub fn from_env() -> Result<Self, MailboxError> {
        let api_url = env::var("MAILGW_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let lifespan_minutes = env::var("MAILBOX_LIFESPAN_MINUTES")
            .unwrap_or_else(|_| "20".to_string())
            .parse::<u64>()
            .map_err(|e| MailboxError::Config(format!("Invalid MAILBOX_LIFESPAN_MINUTES: {}", e)))?;

        let poll_secs = env::var("MAILBOX_POLL_SECS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .map_err(|e| MailboxError::Config(format!("Invalid MAILBOX_POLL_SECS: {}", e)))?;

        if lifespan_minutes == 0 || poll_secs == 0 {
            return Err(MailboxError::Config(
                "Lifespan and poll interval must be positive".to_string(),
            ));
        }

        let release_on_rotate = env::var("MAILBOX_RELEASE_ON_ROTATE")
            .ok()
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            api_url,
            lifespan: Duration::from_secs(lifespan_minutes * 60),
            poll_interval: Duration::from_secs(poll_secs),
            tick_interval: DEFAULT_TICK_INTERVAL,
            release_on_rotate,
        })
    }

    /// Provider client configuration.
    pub fn provider(&self) -> MailGwConfig {
        MailGwConfig::new(&self.api_url)
    }

    /// Builder method to set the provider URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Builder method to set the lifespan.
    pub fn with_lifespan(mut self, lifespan: Duration) -> Self {
        self.lifespan = lifespan;
        self
    }

    /// Builder method to set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Builder method to set the countdown interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Builder method to release rotated accounts.
    pub fn with_release_on_rotate(mut self, release: bool) -> Self {
        self.release_on_rotate = release;
        self
    }
}
