use chrono::Utc;
use mail_gw::MailClient;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::inbox::{InboxState, InboxUpdate};
use crate::render::InboxEntry;
use crate::{Mailbox, MailboxConfig, MailboxError};

/// Something the watcher reports to the front end.
#[derive(Debug, Clone)]
pub enum MailboxEvent {
    /// A new mailbox is being registered; the previous one is gone.
    Provisioning,
    /// The new mailbox is ready.
    Provisioned(Mailbox),
    /// Registration failed; there is no active mailbox until the next
    /// [`WatcherCommand::Regenerate`].
    ProvisionFailed(String),
    /// Countdown refresh.
    Tick { time_left: String },
    /// The active mailbox expired and is about to be replaced.
    Expired,
    /// A successful inbox poll.
    InboxUpdated {
        entries: Vec<InboxEntry>,
        update: InboxUpdate,
    },
}

/// Requests from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherCommand {
    /// Replace the active mailbox now.
    Regenerate,
    /// Poll the inbox now.
    Refresh,
    /// Stop the watcher.
    Shutdown,
}

/// Drives one mailbox at a time: provisions it, counts down to its expiry,
/// rotates it, and polls its inbox.
pub struct InboxWatcher {
    client: MailClient,
    config: MailboxConfig,
}

impl InboxWatcher {
    /// Create a watcher with its own provider client.
    pub fn new(config: MailboxConfig) -> Result<Self, MailboxError> {
        let client = MailClient::new(config.provider())?;
        Ok(Self::with_client(client, config))
    }

    /// Create a watcher on an existing client.
    pub fn with_client(client: MailClient, config: MailboxConfig) -> Self {
        Self { client, config }
    }

    /// The provider client, for reading messages of the active mailbox.
    pub fn client(&self) -> &MailClient {
        &self.client
    }

    /// Start the watcher task.
    ///
    /// Events arrive on the returned receiver. The task stops on
    /// [`WatcherCommand::Shutdown`], when the handle is dropped, or when
    /// the receiver is dropped.
    pub fn spawn(self) -> (WatcherHandle, mpsc::Receiver<MailboxEvent>) {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(100);

        let runner = Runner {
            client: self.client,
            config: self.config,
            events: event_tx,
            session: None,
            inbox: InboxState::new(),
        };
        let task = tokio::spawn(runner.run(command_rx));

        (
            WatcherHandle {
                commands: command_tx,
                task,
            },
            event_rx,
        )
    }
}

/// Control handle for a running [`InboxWatcher`].
pub struct WatcherHandle {
    commands: mpsc::Sender<WatcherCommand>,
    task: JoinHandle<()>,
}

impl WatcherHandle {
    /// Ask for a new mailbox. Returns false if the watcher has stopped.
    pub async fn regenerate(&self) -> bool {
        self.commands.send(WatcherCommand::Regenerate).await.is_ok()
    }

    /// Ask for an immediate inbox poll. Returns false if the watcher has stopped.
    pub async fn refresh(&self) -> bool {
        self.commands.send(WatcherCommand::Refresh).await.is_ok()
    }

    /// Stop the watcher and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.commands.send(WatcherCommand::Shutdown).await;
        if let Err(e) = self.task.await {
            error!("Watcher task failed: {}", e);
        }
    }
}

struct Runner {
    client: MailClient,
    config: MailboxConfig,
    events: mpsc::Sender<MailboxEvent>,
    session: Option<Mailbox>,
    inbox: InboxState,
}

impl Runner {
    async fn run(mut self, mut commands: mpsc::Receiver<WatcherCommand>) {
        info!(
            lifespan = ?self.config.lifespan,
            poll_interval = ?self.config.poll_interval,
            "Starting inbox watcher"
        );

        if !self.rotate().await {
            return;
        }

        let mut tick = interval(self.config.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut poll = interval(self.config.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // rotate() already polled once.
        poll.reset();

        loop {
            let keep_going = tokio::select! {
                _ = tick.tick() => self.on_tick().await,
                _ = poll.tick() => self.poll_inbox().await,
                command = commands.recv() => match command {
                    Some(WatcherCommand::Regenerate) => {
                        let alive = self.rotate().await;
                        poll.reset();
                        alive
                    }
                    Some(WatcherCommand::Refresh) => self.poll_inbox().await,
                    Some(WatcherCommand::Shutdown) | None => false,
                },
            };

            if !keep_going {
                break;
            }
        }

        info!("Inbox watcher stopped");
    }

    /// Send an event; false once nobody is listening.
    async fn emit(&self, event: MailboxEvent) -> bool {
        self.events.send(event).await.is_ok()
    }

    /// Drop the active mailbox and provision a new one.
    async fn rotate(&mut self) -> bool {
        let previous = self.session.take();
        self.inbox.reset();

        if let Some(old) = previous.filter(|_| self.config.release_on_rotate) {
            if let Err(e) = old.release(&self.client).await {
                warn!(address = %old.address, "Failed to release mailbox: {}", e);
            }
        }

        if !self.emit(MailboxEvent::Provisioning).await {
            return false;
        }

        match Mailbox::provision(&self.client, self.config.lifespan).await {
            Ok(mailbox) => {
                self.session = Some(mailbox.clone());
                if !self.emit(MailboxEvent::Provisioned(mailbox)).await {
                    return false;
                }
                self.poll_inbox().await
            }
            Err(e) => {
                error!("Error generating mailbox: {}", e);
                self.emit(MailboxEvent::ProvisionFailed(e.to_string())).await
            }
        }
    }

    async fn on_tick(&mut self) -> bool {
        let Some(mailbox) = &self.session else {
            return true;
        };

        let now = Utc::now();
        if mailbox.is_expired(now) {
            info!(address = %mailbox.address, "Mailbox expired");
            if !self.emit(MailboxEvent::Expired).await {
                return false;
            }
            return self.rotate().await;
        }

        let time_left = mailbox.time_left(now);
        self.emit(MailboxEvent::Tick { time_left }).await
    }

    async fn poll_inbox(&mut self) -> bool {
        let Some(mailbox) = &self.session else {
            return true;
        };

        match self.client.messages(mailbox.token()).await {
            Ok(list) => {
                let entries: Vec<InboxEntry> = list.into_iter().map(InboxEntry::from).collect();
                let update = self.inbox.apply(entries.clone());
                if !update.new_ids.is_empty() {
                    info!(count = update.new_ids.len(), notify = update.notify, "New messages");
                }
                self.emit(MailboxEvent::InboxUpdated { entries, update }).await
            }
            Err(e) if e.is_unauthorized() => {
                // Token rejected; keep the session until expiry rotates it.
                warn!(address = %mailbox.address, "Inbox poll unauthorized: {}", e);
                true
            }
            Err(e) => {
                // Refresh failures are silent; the next tick retries.
                debug!("Inbox poll failed: {}", e);
                true
            }
        }
    }
}
