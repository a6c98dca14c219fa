//! veil: disposable mailboxes in the terminal.
//!
//! Environment variables (a `.env` file is loaded if present):
//! - `MAILGW_API_URL`, `MAILBOX_LIFESPAN_MINUTES`, `MAILBOX_POLL_SECS`,
//!   `MAILBOX_RELEASE_ON_ROTATE` for the mailbox
//! - `VEIL_AI_API_KEY` (required for `summarize` and `address`) and the
//!   other `VEIL_AI_*` settings for the model
//! - `RUST_LOG` for log filtering (logs go to stderr)

mod commands;
mod display;
mod input;
mod watch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mailbox::MailboxConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use veil_brain::{hash_prompt, ADDRESS_INSTRUCTIONS, SUMMARY_INSTRUCTIONS};

#[derive(Debug, Parser)]
#[command(name = "veil")]
#[command(about = "Disposable email addresses with AI summaries and fake postal addresses")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Watch a rotating disposable inbox interactively
    Watch {
        /// Ring the terminal bell when new mail arrives
        #[arg(long)]
        sound: bool,
    },
    /// Create one mailbox and print its login
    New,
    /// Generate a realistic but fake postal address
    Address {
        /// Country to draw the address from (default: random)
        #[arg(long)]
        country: Option<String>,
    },
    /// Summarize an email body from a file or stdin
    Summarize {
        /// File holding the email text (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// List the countries offered for address generation
    Countries,
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args.command).await {
        display::notice(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    debug!(
        summary = %hash_prompt(SUMMARY_INSTRUCTIONS),
        address = %hash_prompt(ADDRESS_INSTRUCTIONS),
        "Prompt fingerprints"
    );

    match command {
        Command::Watch { sound } => watch::run(MailboxConfig::from_env()?, sound).await,
        Command::New => commands::new_mailbox(&MailboxConfig::from_env()?).await,
        Command::Address { country } => commands::address(country.as_deref()).await,
        Command::Summarize { file } => commands::summarize(file.as_deref()).await,
        Command::Countries => {
            commands::countries();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let args = Args::try_parse_from(["veil", "watch", "--sound"]).unwrap();
        assert!(matches!(args.command, Command::Watch { sound: true }));

        let args = Args::try_parse_from(["veil", "address", "--country", "Japan"]).unwrap();
        match args.command {
            Command::Address { country } => assert_eq!(country.as_deref(), Some("Japan")),
            other => panic!("unexpected command: {:?}", other),
        }

        let args = Args::try_parse_from(["veil", "summarize"]).unwrap();
        assert!(matches!(args.command, Command::Summarize { file: None }));
    }
}
