//! Text shown on the terminal.

use mailbox::{format_size, InboxEntry, Mailbox, MailboxError, MessageView};
use veil_brain::Address;

pub const PROVISION_FAILED: &str = "Could not generate a new email address. Please try again.";
pub const FETCH_FAILED: &str = "Could not fetch email content.";
pub const EXPIRED: &str = "Email Expired: generating a new temporary email address.";
pub const EMPTY_INBOX: &str = "Inbox is empty. Waiting for incoming emails...";

/// Bell character, the terminal's notification sound.
pub const BELL: char = '\x07';

const SUBJECT_WIDTH: usize = 40;
const FROM_WIDTH: usize = 28;

/// Print a one-line notice, the terminal stand-in for a toast.
pub fn notice(text: &str) {
    println!("[!] {}", text);
}

/// Header printed when a new mailbox becomes active.
pub fn mailbox_header(mailbox: &Mailbox, time_left: &str) -> String {
    format!(
        "Address:  {}\nPassword: {}\nExpires:  {} (in {})",
        mailbox.address,
        mailbox.password(),
        mailbox.expires_at.with_timezone(&chrono::Local).format("%-I:%M:%S %p"),
        time_left
    )
}

/// Numbered inbox listing, newest first as the provider returns it.
pub fn inbox_table(entries: &[InboxEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_INBOX.to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{:>3}. {:<fw$}  {:<sw$}  {}",
                i + 1,
                truncate(&entry.from, FROM_WIDTH),
                truncate(subject_or_placeholder(&entry.subject), SUBJECT_WIDTH),
                entry.short_date(),
                fw = FROM_WIDTH,
                sw = SUBJECT_WIDTH,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full message view with the body rendered to text.
pub fn message_detail(view: &MessageView, width: usize) -> Result<String, MailboxError> {
    let mut out = format!(
        "Subject: {}\nFrom:    {}\nTo:      {}\nDate:    {}\n",
        subject_or_placeholder(&view.subject),
        view.from,
        view.to,
        view.long_date()
    );

    if !view.attachments.is_empty() {
        let names = view
            .attachments
            .iter()
            .map(|a| format!("{} ({})", a.filename, format_size(a.size)))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("Attach:  {}\n", names));
    }

    out.push('\n');
    out.push_str(view.render_text(width)?.trim_end());
    Ok(out)
}

/// Three-line address block.
pub fn address_block(address: &Address) -> String {
    address
        .lines()
        .iter()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn subject_or_placeholder(subject: &str) -> &str {
    if subject.trim().is_empty() {
        "(no subject)"
    } else {
        subject
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
