//! Inbox diffing and new-mail notification.

use std::collections::HashSet;

use crate::render::InboxEntry;

/// Result of applying a fresh inbox listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxUpdate {
    /// Ids that were not in the previous listing.
    pub new_ids: Vec<String>,
    /// Whether to play the new-mail sound.
    pub notify: bool,
}

/// Last known inbox contents for the active mailbox.
#[derive(Debug, Clone, Default)]
pub struct InboxState {
    entries: Vec<InboxEntry>,
    previous_count: usize,
}

impl InboxState {
    /// Empty state, as after rotating to a new mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listing and report what changed.
    ///
    /// The sound only plays when the count grows from a non-zero count, so
    /// the very first mail on a fresh mailbox arrives silently.
    pub fn apply(&mut self, entries: Vec<InboxEntry>) -> InboxUpdate {
        let known: HashSet<&str> = self.entries.iter().map(|e| e.id.as_str()).collect();
        let new_ids: Vec<String> = entries
            .iter()
            .filter(|e| !known.contains(e.id.as_str()))
            .map(|e| e.id.clone())
            .collect();

        let count = entries.len();
        let notify = count > self.previous_count && self.previous_count > 0;

        self.previous_count = count;
        self.entries = entries;

        InboxUpdate { new_ids, notify }
    }

    /// Current listing.
    pub fn entries(&self) -> &[InboxEntry] {
        &self.entries
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.previous_count = 0;
    }
}
