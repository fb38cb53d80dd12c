//! Mail transport — IMAP polling for inbound, SMTP via lettre for outbound.

pub mod compose;
pub mod imap;
pub mod smtp;

use async_trait::async_trait;

use crate::error::ChannelError;

pub use imap::ImapInbox;
pub use smtp::SmtpOutbox;

/// A fetched inbound email, already decoded to text.
#[derive(Debug, Clone)]
pub struct InboundEmail {
    /// Decoded subject line.
    pub subject: String,
    /// Plain-text body (first text part).
    pub body: String,
    /// Message-ID header, empty when the sender omitted it.
    pub message_id: String,
    /// Transport-native handle, used to acknowledge the message.
    pub uid: String,
}

/// Source of inbound reply candidates.
#[async_trait]
pub trait Inbox: Send + Sync {
    /// Fetch up to `limit` recent messages, newest first.
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<InboundEmail>, ChannelError>;

    /// Acknowledge a message (mark it read).
    async fn mark_seen(&self, uid: &str) -> Result<(), ChannelError>;
}

/// Sink for outbound mail.
#[async_trait]
pub trait Outbox: Send + Sync {
    /// Send a message with a plain-text body and an optional HTML alternative.
    async fn send(
        &self,
        to: &str,
        subject: &str,
        plain: &str,
        html: Option<&str>,
    ) -> Result<(), ChannelError>;
}
