//! mail.gw HTTP client.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::MailGwConfig;
use crate::error::MailGwError;
use crate::types::{
    Account, Collection, Credentials, Domain, Message, MessageSummary, Token, TokenResponse,
};

/// Client for the mail.gw REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct MailClient {
    http: Client,
    config: MailGwConfig,
}

impl MailClient {
    /// Create a client for the given configuration.
    pub fn new(config: MailGwConfig) -> Result<Self, MailGwError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(MailGwError::Http)?;

        debug!("mail.gw client for {}", config.base_url);
        Ok(Self { http, config })
    }

    /// List the domains new accounts can be registered on.
    pub async fn domains(&self) -> Result<Vec<Domain>, MailGwError> {
        let url = self.config.domains_url();
        let collection: Collection<Domain> = self.fetch(self.http.get(&url), "domains").await?;
        Ok(collection.into_members())
    }

    /// Register a new account.
    pub async fn create_account(&self, credentials: &Credentials) -> Result<Account, MailGwError> {
        let url = self.config.accounts_url();
        let request = self.http.post(&url).json(&credentials.body());
        let account: Account = self.fetch(request, "create_account").await?;
        info!(address = %account.address, id = %account.id, "Account created");
        Ok(account)
    }

    /// Exchange credentials for a bearer token.
    pub async fn token(&self, credentials: &Credentials) -> Result<Token, MailGwError> {
        let url = self.config.token_url();
        let request = self.http.post(&url).json(&credentials.body());
        let resp: TokenResponse = self.fetch(request, "token").await?;
        Ok(resp.into())
    }

    /// Fetch the account a token belongs to.
    pub async fn me(&self, token: &Token) -> Result<Account, MailGwError> {
        let url = self.config.me_url();
        self.fetch(self.http.get(&url).bearer_auth(token.bearer()), "me")
            .await
    }

    /// List the messages in the inbox, newest first.
    pub async fn messages(&self, token: &Token) -> Result<Vec<MessageSummary>, MailGwError> {
        let url = self.config.messages_url();
        let collection: Collection<MessageSummary> = self
            .fetch(self.http.get(&url).bearer_auth(token.bearer()), "messages")
            .await?;
        debug!(
            count = collection.members.len(),
            total = ?collection.total_items,
            "Listed messages"
        );
        Ok(collection.into_members())
    }

    /// Fetch a single message with its bodies.
    pub async fn message(&self, token: &Token, id: &str) -> Result<Message, MailGwError> {
        let url = self.config.message_url(id);
        self.fetch(self.http.get(&url).bearer_auth(token.bearer()), "message")
            .await
    }

    /// Delete an account. The token must belong to it.
    pub async fn delete_account(&self, token: &Token, id: &str) -> Result<(), MailGwError> {
        let url = self.config.account_url(id);
        let response = self
            .http
            .delete(&url)
            .bearer_auth(token.bearer())
            .send()
            .await
            .map_err(MailGwError::Http)?;
        check_status(response).await?;
        info!(id = %id, "Account deleted");
        Ok(())
    }

    /// Get the configuration (front ends log which provider they talk to).
    pub fn config(&self) -> &MailGwConfig {
        &self.config
    }

    /// Send a request and decode a JSON body.
    async fn fetch<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        op: &str,
    ) -> Result<R, MailGwError> {
        debug!("mail.gw call: {}", op);

        let response = request.send().await.map_err(MailGwError::Http)?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await.map_err(MailGwError::Http)?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

async fn check_status(response: Response) -> Result<Response, MailGwError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(MailGwError::Status {
        status: status.as_u16(),
        body,
    })
}

impl std::fmt::Debug for MailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailClient")
            .field("config", &self.config)
            .finish()
    }
}
