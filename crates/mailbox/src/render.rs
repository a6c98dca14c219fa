//! Normalized message views and terminal rendering.

use chrono::{DateTime, Local, Utc};
use mail_gw::{Attachment, Message, MessageSummary, Sender};

use crate::MailboxError;

/// Shown when a message carries no sender address.
pub const UNKNOWN_SENDER: &str = "Unknown Sender";

fn sender_address(from: Option<&Sender>) -> String {
    from.map(|s| s.address.trim())
        .filter(|a| !a.is_empty())
        .unwrap_or(UNKNOWN_SENDER)
        .to_string()
}

/// One row of the inbox list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxEntry {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub date: DateTime<Utc>,
}

impl From<MessageSummary> for InboxEntry {
    fn from(summary: MessageSummary) -> Self {
        Self {
            from: sender_address(summary.from.as_ref()),
            id: summary.id,
            subject: summary.subject,
            date: summary.created_at,
        }
    }
}

impl InboxEntry {
    /// List-row timestamp, e.g. "03/01/2024, 10:05 AM".
    pub fn short_date(&self) -> String {
        self.date
            .with_timezone(&Local)
            .format("%m/%d/%Y, %-I:%M %p")
            .to_string()
    }
}

/// A message ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: String,
    pub from: String,
    /// Recipients joined with ", ".
    pub to: String,
    pub subject: String,
    pub date: DateTime<Utc>,
    pub attachments: Vec<Attachment>,
    /// Plain text body, used for summaries.
    pub text_body: String,
    /// HTML body; synthesized from the text body when the mail has none.
    pub html_body: String,
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        let text_body = message.text.unwrap_or_default();
        let html_body = match message.html.into_iter().next() {
            Some(html) => html,
            None => text_to_html(&text_body),
        };

        Self {
            from: sender_address(message.from.as_ref()),
            to: message
                .to
                .iter()
                .map(|t| t.address.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            id: message.id,
            subject: message.subject,
            date: message.created_at,
            attachments: message.attachments,
            text_body,
            html_body,
        }
    }
}

impl MessageView {
    /// Detail timestamp, e.g. "March 1, 2024 10:05 AM".
    pub fn long_date(&self) -> String {
        self.date
            .with_timezone(&Local)
            .format("%B %-d, %Y %-I:%M %p")
            .to_string()
    }

    /// Render the HTML body as wrapped plain text.
    pub fn render_text(&self, width: usize) -> Result<String, MailboxError> {
        html2text::from_read(self.html_body.as_bytes(), width.max(20))
            .map_err(|e| MailboxError::Render(e.to_string()))
    }
}

/// Wrap a plain text body in a paragraph, turning newlines into `<br />`.
pub fn text_to_html(text: &str) -> String {
    format!("<p>{}</p>", text.replace('\n', "<br />"))
}

/// Human-readable attachment size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    match bytes {
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}
