//! Provisioning and reading a single disposable mailbox.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use mail_gw::{Credentials, MailClient, Token};
use rand::Rng;
use tracing::{debug, info};

use crate::countdown::format_time_left;
use crate::credentials::{pick_domain, GeneratedLogin};
use crate::render::MessageView;
use crate::MailboxError;

/// The one active disposable mailbox.
#[derive(Debug, Clone)]
pub struct Mailbox {
    /// Full address as registered by the provider.
    pub address: String,
    /// Provider account identifier.
    pub account_id: String,
    /// Login password.
    credentials: Credentials,
    /// Bearer token for inbox calls.
    token: Token,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Mailbox {
    /// Register a fresh mailbox with a random name on a random domain.
    ///
    /// The expiry is fixed as soon as the account exists, before the token
    /// is requested.
    pub async fn provision(
        client: &MailClient,
        lifespan: std::time::Duration,
    ) -> Result<Self, MailboxError> {
        let domains = client.domains().await?;
        // ThreadRng is not Send; drop it before the next await.
        let (address, login) = {
            let mut rng = rand::thread_rng();
            let domain = pick_domain(&mut rng, &domains)?;
            let login = GeneratedLogin::random(&mut rng);
            (login.address(domain), login)
        };
        Self::register(client, &address, &login.password, lifespan).await
    }

    /// Register a mailbox with a caller-chosen random source.
    pub async fn provision_with<R: Rng + Send>(
        client: &MailClient,
        lifespan: std::time::Duration,
        rng: &mut R,
    ) -> Result<Self, MailboxError> {
        let domains = client.domains().await?;
        let domain = pick_domain(rng, &domains)?;
        let login = GeneratedLogin::random(rng);
        let address = login.address(domain);
        Self::register(client, &address, &login.password, lifespan).await
    }

    async fn register(
        client: &MailClient,
        address: &str,
        password: &str,
        lifespan: std::time::Duration,
    ) -> Result<Self, MailboxError> {
        debug!(address = %address, "Registering mailbox");
        let credentials = Credentials::new(address, password);
        let account = client.create_account(&credentials).await?;

        let lifespan = ChronoDuration::from_std(lifespan)
            .map_err(|e| MailboxError::Config(format!("Invalid lifespan: {}", e)))?;
        let created_at = Utc::now();
        let expires_at = created_at + lifespan;

        // Log in with the address the provider echoed back.
        let credentials = credentials.with_address(account.address.clone());
        let token = client.token(&credentials).await?;

        info!(address = %account.address, expires_at = %expires_at, "Mailbox ready");

        Ok(Self {
            address: account.address,
            account_id: account.id,
            credentials,
            token,
            created_at,
            expires_at,
        })
    }

    /// Login password (exposes the secret).
    pub fn password(&self) -> &str {
        self.credentials.password()
    }

    /// Bearer token for provider calls.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Signed time until expiry.
    pub fn remaining(&self, now: DateTime<Utc>) -> ChronoDuration {
        self.expires_at - now
    }

    /// Whether the mailbox has passed its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now) < ChronoDuration::zero()
    }

    /// Countdown label, `MM:SS` or "Expired".
    pub fn time_left(&self, now: DateTime<Utc>) -> String {
        format_time_left(self.remaining(now))
    }

    /// Fetch and normalize one message.
    pub async fn read(&self, client: &MailClient, id: &str) -> Result<MessageView, MailboxError> {
        let message = client.message(&self.token, id).await?;
        Ok(MessageView::from(message))
    }

    /// Delete the account on the provider.
    pub async fn release(&self, client: &MailClient) -> Result<(), MailboxError> {
        client.delete_account(&self.token, &self.account_id).await?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn fixture(address: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            address: address.to_string(),
            account_id: "acc1".to_string(),
            credentials: Credentials::new(address, "abcdefghijkl"),
            token: Token::new("acc1", "tok"),
            created_at: expires_at - ChronoDuration::minutes(20),
            expires_at,
        }
    }
}
