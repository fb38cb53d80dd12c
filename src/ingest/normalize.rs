//! Inbound text normalization — decoded subjects and plain-text bodies.
//!
//! Header decoding (RFC 2047 encoded words, charset conversion) is done by
//! `mail-parser`; decoding errors are replaced, never raised.

use mail_parser::{Message, MessageParser};

/// Parse a raw RFC 822 message. `None` when the bytes are not parseable.
pub fn parse_message(raw: &[u8]) -> Option<Message<'_>> {
    MessageParser::default().parse(raw)
}

/// Decoded subject line, empty when the header is missing.
pub fn decoded_subject(message: &Message) -> String {
    message.subject().unwrap_or_default().to_string()
}

/// First plain-text body part (depth-first across MIME parts); empty
/// string when the message has none.
pub fn plain_text_body(message: &Message) -> String {
    message
        .body_text(0)
        .map(|text| text.to_string())
        .unwrap_or_default()
}
