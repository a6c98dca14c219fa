//! Error types for veil-brain.

use thiserror::Error;

/// Errors that can occur while running a prompt flow.
#[derive(Debug, Error)]
pub enum BrainError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Could not reach the model provider.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider rejected or failed the request.
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),

    /// The model answered, but not in the requested shape.
    #[error("Invalid model output: {0}")]
    InvalidOutput(String),

    /// Input too short to be worth sending to the model.
    #[error("Email content is too short to summarize.")]
    TooShort,
}

/// Which flow produced an error, for user-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Summary,
    Address,
}

impl BrainError {
    /// The one-line notice shown to the user.
    ///
    /// Input validation errors are shown verbatim; provider and output
    /// errors are collapsed into a generic sentence.
    pub fn user_message(&self, flow: Flow) -> String {
        match (self, flow) {
            (BrainError::TooShort, _) => self.to_string(),
            (_, Flow::Summary) => "An AI error occurred while generating the summary.".to_string(),
            (_, Flow::Address) => "An AI error occurred while generating the address.".to_string(),
        }
    }
}
