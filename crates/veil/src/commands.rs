//! One-shot subcommands.

use std::error::Error;
use std::path::Path;

use chrono::Utc;
use mail_gw::MailClient;
use mailbox::{Mailbox, MailboxConfig};
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use veil_brain::{
    country_choice, find_country, generate_address, summarize_email, Address, ChatBackend,
    ChatClient, Flow, COUNTRIES,
};

use crate::display::{self, address_block, mailbox_header};

/// Provision one mailbox and print its login.
pub async fn new_mailbox(config: &MailboxConfig) -> Result<(), Box<dyn Error>> {
    let client = MailClient::new(config.provider())?;
    match Mailbox::provision(&client, config.lifespan).await {
        Ok(mailbox) => {
            println!("{}", mailbox_header(&mailbox, &mailbox.time_left(Utc::now())));
            Ok(())
        }
        Err(e) => {
            warn!("Mailbox provisioning failed: {}", e);
            Err(display::PROVISION_FAILED.into())
        }
    }
}

/// Generate and print a fake address.
pub async fn address(country: Option<&str>) -> Result<(), Box<dyn Error>> {
    let brain = ChatClient::from_env()?;
    let country = resolve_country(country);
    let address = fake_address(&brain, country.as_deref()).await?;
    println!("{}", address_block(&address));
    Ok(())
}

/// Summarize a file, or stdin when no file is given.
pub async fn summarize(file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let body = match file {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut body = String::new();
            tokio::io::stdin().read_to_string(&mut body).await?;
            body
        }
    };

    let brain = ChatClient::from_env()?;
    let summary = summary_text(&brain, &body).await?;
    println!("{}", summary);
    Ok(())
}

/// Print the selectable countries.
pub fn countries() {
    println!("Random");
    for country in COUNTRIES {
        println!("{}", country);
    }
}

/// Summarize a body, mapping failures to the user-facing notice.
pub async fn summary_text<B>(brain: &B, body: &str) -> Result<String, String>
where
    B: ChatBackend + ?Sized,
{
    match summarize_email(brain, body).await {
        Ok(summary) => {
            info!(chars = summary.summary.len(), "Summary generated");
            Ok(summary.summary)
        }
        Err(e) => {
            warn!("Summarization failed: {}", e);
            Err(e.user_message(Flow::Summary))
        }
    }
}

/// Generate an address, mapping failures to the user-facing notice.
pub async fn fake_address<B>(brain: &B, country: Option<&str>) -> Result<Address, String>
where
    B: ChatBackend + ?Sized,
{
    generate_address(brain, country).await.map_err(|e| {
        warn!("Address generation failed: {}", e);
        e.user_message(Flow::Address)
    })
}

/// Canonical country name for a user choice; `None` means any country.
///
/// Names outside the list are passed through as typed.
pub fn resolve_country(choice: Option<&str>) -> Option<String> {
    let choice = country_choice(choice)?;
    match find_country(choice) {
        Some(country) => Some(country.to_string()),
        None => {
            warn!(country = %choice, "Country is not in the list, using it as typed");
            Some(choice.to_string())
        }
    }
}
