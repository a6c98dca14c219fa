//! Email summarization flow.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api_types::ChatMessage;
use crate::backend::{ChatBackend, OutputFormat};
use crate::prompt::{contains_json, parse_json_reply};
use crate::BrainError;

/// Bodies shorter than this (after trimming) are not sent to the model.
pub const MIN_SUMMARY_INPUT_CHARS: usize = 20;

/// Output contract given to the model.
pub const SUMMARY_INSTRUCTIONS: &str = "You summarize emails. Respond with a single JSON object \
of the form {\"summary\": string} and nothing else.";

/// A model-written summary of an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
}

/// Build the user prompt for a body.
pub fn summary_prompt(email_body: &str) -> String {
    format!("Summarize the following email:\n\n{}", email_body)
}

/// Summarize an email body.
///
/// Returns [`BrainError::TooShort`] without calling the backend when the
/// body has fewer than [`MIN_SUMMARY_INPUT_CHARS`] characters.
pub async fn summarize_email<B>(backend: &B, email_body: &str) -> Result<Summary, BrainError>
where
    B: ChatBackend + ?Sized,
{
    if email_body.trim().chars().count() < MIN_SUMMARY_INPUT_CHARS {
        return Err(BrainError::TooShort);
    }

    let messages = vec![
        ChatMessage::system(SUMMARY_INSTRUCTIONS),
        ChatMessage::user(summary_prompt(email_body)),
    ];

    debug!(backend = backend.name(), chars = email_body.len(), "Summarizing email");
    let reply = backend.complete(messages, OutputFormat::Json).await?;
    let summary = parse_summary(&reply)?;
    info!(chars = summary.summary.len(), "Summary generated");

    Ok(summary)
}

/// Interpret a model reply as a summary.
///
/// Models that ignore the JSON contract still produce usable prose, so a
/// reply without any JSON is taken as the summary text itself.
fn parse_summary(reply: &str) -> Result<Summary, BrainError> {
    let summary = if contains_json(reply) {
        parse_json_reply::<Summary>(reply)?
    } else {
        Summary {
            summary: reply.to_string(),
        }
    };

    let text = summary.summary.trim();
    if text.is_empty() {
        return Err(BrainError::InvalidOutput("Empty summary".to_string()));
    }

    Ok(Summary {
        summary: text.to_string(),
    })
}
