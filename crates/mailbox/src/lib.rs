//! # mailbox
//!
//! Lifecycle of a disposable mailbox on top of [`mail_gw`]: random
//! registration, a fixed lifespan with automatic rotation, inbox polling
//! with new-mail detection, and message rendering.
//!
//! ## Watching a mailbox
//!
//! ```no_run
//! use mailbox::{InboxWatcher, MailboxConfig, MailboxEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailbox::MailboxError> {
//!     let watcher = InboxWatcher::new(MailboxConfig::from_env()?)?;
//!     let (handle, mut events) = watcher.spawn();
//!
//!     while let Some(event) = events.recv().await {
//!         match event {
//!             MailboxEvent::Provisioned(mailbox) => println!("Address: {}", mailbox.address),
//!             MailboxEvent::InboxUpdated { entries, .. } => println!("{} messages", entries.len()),
//!             _ => {}
//!         }
//!     }
//!
//!     handle.shutdown().await;
//!     Ok(())
//! }
//! ```

mod config;
mod countdown;
mod credentials;
mod error;
mod inbox;
mod render;
mod session;
mod watcher;

pub use config::{MailboxConfig, DEFAULT_LIFESPAN, DEFAULT_POLL_INTERVAL, DEFAULT_TICK_INTERVAL};
pub use countdown::{format_time_left, EXPIRED_LABEL};
pub use credentials::{
    pick_domain, random_lowercase, GeneratedLogin, LOCAL_PART_LEN, PASSWORD_LEN,
};
pub use error::MailboxError;
pub use inbox::{InboxState, InboxUpdate};
pub use render::{format_size, text_to_html, InboxEntry, MessageView, UNKNOWN_SENDER};
pub use session::Mailbox;
pub use watcher::{InboxWatcher, MailboxEvent, WatcherCommand, WatcherHandle};
