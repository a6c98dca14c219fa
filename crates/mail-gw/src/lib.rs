//! mail.gw disposable mailbox client library.
//!
//! This crate provides a typed async client for the mail.gw REST API. It
//! supports:
//!
//! - Listing the domains accounts can be registered on
//! - Registering accounts and obtaining bearer tokens
//! - Listing and reading inbox messages
//!
//! # Example
//!
//! ```no_run
//! use mail_gw::{Credentials, MailClient, MailGwConfig};
//!
//! # async fn example() -> Result<(), mail_gw::MailGwError> {
//! let client = MailClient::new(MailGwConfig::default())?;
//!
//! let domains = client.domains().await?;
//! let address = format!("qwerty@{}", domains[0].domain);
//! let credentials = Credentials::new(address, "correcthorsebattery");
//!
//! client.create_account(&credentials).await?;
//! let token = client.token(&credentials).await?;
//!
//! for message in client.messages(&token).await? {
//!     println!("{}: {}", message.id, message.subject);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::MailClient;
pub use config::{MailGwConfig, DEFAULT_BASE_URL};
pub use error::MailGwError;
pub use types::*;
