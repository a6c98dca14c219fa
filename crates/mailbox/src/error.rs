use thiserror::Error;

/// Errors that can occur while managing a disposable mailbox.
#[derive(Debug, Error)]
pub enum MailboxError {
    /// The provider call failed.
    #[error("Mail provider error: {0}")]
    Provider(#[from] mail_gw::MailGwError),

    /// The provider offered no usable domain.
    #[error("No available domains.")]
    NoDomains,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rendering a message body failed.
    #[error("Render error: {0}")]
    Render(String),
}
