use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// A registered mailbox account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Provider identifier.
    pub id: String,
    /// Full mailbox address.
    pub address: String,
    /// Storage quota in bytes.
    #[serde(default)]
    pub quota: u64,
    /// Storage used in bytes.
    #[serde(default)]
    pub used: u64,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Address and password used both to register and to log in.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Full mailbox address.
    pub address: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials for an address.
    pub fn new(address: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Get the password (exposes the secret).
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Same password, different address.
    pub fn with_address(&self, address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            password: self.password.clone(),
        }
    }

    pub(crate) fn body(&self) -> CredentialsBody<'_> {
        CredentialsBody {
            address: &self.address,
            password: self.password(),
        }
    }
}

/// Wire form of [`Credentials`].
#[derive(Debug, Serialize)]
pub(crate) struct CredentialsBody<'a> {
    address: &'a str,
    password: &'a str,
}

/// A bearer token for an account.
#[derive(Debug, Clone)]
pub struct Token {
    /// Account identifier the token belongs to.
    pub id: String,
    token: SecretString,
}

impl Token {
    /// Wrap a raw bearer token.
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: SecretString::from(token.into()),
        }
    }

    /// Get the raw bearer token (exposes the secret).
    pub fn bearer(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Token response as sent by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub id: String,
    pub token: String,
}

impl From<TokenResponse> for Token {
    fn from(resp: TokenResponse) -> Self {
        Token::new(resp.id, resp.token)
    }
}
