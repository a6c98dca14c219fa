//! Language-model flows for MailVeil.
//!
//! This crate provides two prompt flows on top of any OpenAI-compatible
//! chat completion API:
//!
//! - [`summarize_email`] - a short summary of an email body
//! - [`generate_address`] - a realistic but fake postal address
//!
//! Both are written against the [`ChatBackend`] trait; [`ChatClient`] is
//! the HTTP implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use veil_brain::{generate_address, ChatClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = ChatClient::from_env()?;
//!     let address = generate_address(&backend, Some("Canada")).await?;
//!     println!("{}", address);
//!     Ok(())
//! }
//! ```

mod address;
mod api_types;
mod backend;
mod config;
mod countries;
mod error;
mod prompt;
mod summarize;

pub use address::{
    address_prompt, country_choice, generate_address, Address, ADDRESS_INSTRUCTIONS,
};
pub use api_types::ChatMessage;
pub use backend::{ChatBackend, ChatClient, OutputFormat};
pub use config::{BrainConfig, BrainConfigBuilder, DEFAULT_API_URL, DEFAULT_MODEL};
pub use countries::{find_country, COUNTRIES};
pub use error::{BrainError, Flow};
pub use prompt::{hash_prompt, parse_json_reply};
pub use summarize::{
    summarize_email, summary_prompt, Summary, MIN_SUMMARY_INPUT_CHARS, SUMMARY_INSTRUCTIONS,
};

// Re-export async_trait for backend implementors
pub use async_trait::async_trait;
