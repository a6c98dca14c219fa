//! Request and response types for the mail.gw API.

mod account;
mod domain;
mod message;

pub use account::{Account, Credentials, Token};
pub(crate) use account::TokenResponse;
pub use domain::Domain;
pub use message::{Attachment, Message, MessageSummary, Sender};

use serde::Deserialize;

/// Hydra (JSON-LD) collection envelope used by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    /// Items of the current page.
    #[serde(rename = "hydra:member")]
    pub members: Vec<T>,
    /// Total number of items across pages, when reported.
    #[serde(rename = "hydra:totalItems", default)]
    pub total_items: Option<u64>,
}

impl<T> Collection<T> {
    /// Consume the envelope, keeping only the items.
    pub fn into_members(self) -> Vec<T> {
        self.members
    }
}
