//! Interactive inbox session.

use std::error::Error;
use std::io::Write;
use std::sync::Arc;

use mail_gw::MailClient;
use mailbox::{
    InboxEntry, InboxWatcher, Mailbox, MailboxConfig, MailboxEvent, MessageView, WatcherHandle,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use veil_brain::{Address, ChatBackend, ChatClient};

use crate::commands::{fake_address, resolve_country, summary_text};
use crate::display::{self, address_block, inbox_table, mailbox_header, message_detail, notice};
use crate::input::{Input, HELP};

const DETAIL_WIDTH: usize = 80;

/// Result of a model call that ran in the background.
enum AiReply {
    Summary(Result<String, String>),
    Address(Result<Address, String>),
}

/// Run the interactive session until `quit`, end of input, or Ctrl-C.
pub async fn run(config: MailboxConfig, sound: bool) -> Result<(), Box<dyn Error>> {
    let watcher = InboxWatcher::new(config)?;
    let (ai_tx, mut ai_rx) = mpsc::channel(8);
    let mut session = Session::new(watcher.client().clone(), sound, ai_tx);
    let (handle, mut events) = watcher.spawn();

    println!("{}\n", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => session.on_event(event),
                None => break,
            },
            line = lines.next_line() => match line? {
                Some(line) => match Input::parse(&line) {
                    Ok(Input::Quit) => break,
                    Ok(input) => session.on_input(input, &handle).await,
                    Err(message) => notice(&message),
                },
                None => break,
            },
            Some(reply) = ai_rx.recv() => session.on_ai_reply(reply),
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("Shutting down");
    handle.shutdown().await;
    Ok(())
}

struct Session {
    client: MailClient,
    mailbox: Option<Mailbox>,
    entries: Vec<InboxEntry>,
    time_left: String,
    sound: bool,
    brain: Option<Arc<ChatClient>>,
    ai_replies: mpsc::Sender<AiReply>,
}

impl Session {
    fn new(client: MailClient, sound: bool, ai_replies: mpsc::Sender<AiReply>) -> Self {
        info!(provider = %client.config().base_url, "Starting interactive session");
        Self {
            client,
            mailbox: None,
            entries: Vec::new(),
            time_left: String::new(),
            sound,
            brain: None,
            ai_replies,
        }
    }

    fn on_event(&mut self, event: MailboxEvent) {
        match event {
            MailboxEvent::Provisioning => {
                self.mailbox = None;
                self.entries.clear();
                println!("Generating a new address...");
            }
            MailboxEvent::Provisioned(mailbox) => {
                self.time_left = mailbox.time_left(chrono::Utc::now());
                println!("{}", mailbox_header(&mailbox, &self.time_left));
                self.mailbox = Some(mailbox);
            }
            MailboxEvent::ProvisionFailed(reason) => {
                debug!(reason = %reason, "Provisioning failed");
                notice(display::PROVISION_FAILED);
            }
            MailboxEvent::Tick { time_left } => {
                // Once a minute is enough on a line-based terminal.
                if time_left.ends_with(":00") && time_left != self.time_left {
                    println!("Time left: {}", time_left);
                }
                self.time_left = time_left;
            }
            MailboxEvent::Expired => notice(display::EXPIRED),
            MailboxEvent::InboxUpdated { entries, update } => {
                let changed = !update.new_ids.is_empty() || entries.len() != self.entries.len();
                self.entries = entries;
                if changed {
                    println!("{}", inbox_table(&self.entries));
                }
                if update.notify && self.sound {
                    ring();
                }
            }
        }
    }

    async fn on_input(&mut self, input: Input, handle: &WatcherHandle) {
        match input {
            Input::List => self.list(),
            Input::Open(n) => {
                if let Some(view) = self.read(n).await {
                    match message_detail(&view, DETAIL_WIDTH) {
                        Ok(detail) => println!("{}", detail),
                        Err(e) => {
                            warn!("Failed to render message: {}", e);
                            println!("{}", view.text_body);
                        }
                    }
                }
            }
            Input::Summary(n) => {
                let Some(view) = self.read(n).await else {
                    return;
                };
                let Some(brain) = self.brain() else {
                    return;
                };
                println!("Summarizing...");
                spawn_summary(brain, view.text_body, self.ai_replies.clone());
            }
            Input::New => {
                handle.regenerate().await;
            }
            Input::Refresh => {
                handle.refresh().await;
            }
            Input::Sound(on) => {
                self.sound = on;
                println!("Sound {}", if on { "on" } else { "off" });
            }
            Input::Address(country) => {
                let country = resolve_country(country.as_deref());
                let Some(brain) = self.brain() else {
                    return;
                };
                println!("Generating address...");
                spawn_address(brain, country, self.ai_replies.clone());
            }
            Input::Help => println!("{}", HELP),
            Input::Quit | Input::Nothing => {}
        }
    }

    fn on_ai_reply(&self, reply: AiReply) {
        match reply {
            AiReply::Summary(Ok(summary)) => println!("Summary:\n{}", summary),
            AiReply::Address(Ok(address)) => println!("{}", address_block(&address)),
            AiReply::Summary(Err(message)) | AiReply::Address(Err(message)) => notice(&message),
        }
    }

    fn list(&self) {
        match &self.mailbox {
            Some(mailbox) => println!("{} (expires in {})", mailbox.address, self.time_left),
            None => println!("No active address. Type 'new' to try again."),
        }
        println!("{}", inbox_table(&self.entries));
    }

    /// Fetch message `n` (1-based) of the current listing.
    async fn read(&self, n: usize) -> Option<MessageView> {
        let Some(mailbox) = &self.mailbox else {
            notice("No active address.");
            return None;
        };
        let Some(entry) = self.entries.get(n - 1) else {
            notice(&format!("No message number {}.", n));
            return None;
        };

        match mailbox.read(&self.client, &entry.id).await {
            Ok(view) => Some(view),
            Err(e) => {
                warn!(id = %entry.id, "Failed to fetch message: {}", e);
                notice(display::FETCH_FAILED);
                None
            }
        }
    }

    /// The AI client, created on first use.
    fn brain(&mut self) -> Option<Arc<ChatClient>> {
        if self.brain.is_none() {
            match ChatClient::from_env() {
                Ok(client) => self.brain = Some(Arc::new(client)),
                Err(e) => {
                    notice(&e.to_string());
                    return None;
                }
            }
        }
        self.brain.clone()
    }
}

/// Summarize in the background; the reply arrives on `replies`.
fn spawn_summary<B>(brain: Arc<B>, body: String, replies: mpsc::Sender<AiReply>)
where
    B: ChatBackend + 'static,
{
    tokio::spawn(async move {
        let reply = summary_text(brain.as_ref(), &body).await;
        let _ = replies.send(AiReply::Summary(reply)).await;
    });
}

/// Generate an address in the background; the reply arrives on `replies`.
fn spawn_address<B>(brain: Arc<B>, country: Option<String>, replies: mpsc::Sender<AiReply>)
where
    B: ChatBackend + 'static,
{
    tokio::spawn(async move {
        let reply = fake_address(brain.as_ref(), country.as_deref()).await;
        let _ = replies.send(AiReply::Address(reply)).await;
    });
}

fn ring() {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{}", display::BELL);
    let _ = stdout.flush();
}
