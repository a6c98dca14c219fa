use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A sender or recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Sender {
    /// Email address. May be empty on malformed mail.
    #[serde(default)]
    pub address: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// An inbox row as returned by `GET /messages`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    pub id: String,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub seen: bool,
    #[serde(default)]
    pub has_attachments: bool,
    pub created_at: DateTime<Utc>,
}

/// A full message as returned by `GET /messages/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub to: Vec<Sender>,
    #[serde(default)]
    pub subject: String,
    /// Plain text body.
    #[serde(default)]
    pub text: Option<String>,
    /// HTML parts; the first one is the displayable body.
    #[serde(default)]
    pub html: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

/// Attachment metadata. Content is fetched separately via `download_url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_url: Option<String>,
}
