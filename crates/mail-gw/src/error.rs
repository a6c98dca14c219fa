//! Error types for mail-gw.

use thiserror::Error;

/// Errors that can occur when talking to the mail.gw API.
#[derive(Debug, Error)]
pub enum MailGwError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl MailGwError {
    /// HTTP status code, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            MailGwError::Status { status, .. } => Some(*status),
            MailGwError::Http(e) => e.status().map(|s| s.as_u16()),
            MailGwError::Json(_) => None,
        }
    }

    /// Whether the bearer token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
