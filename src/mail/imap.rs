//! IMAP inbound — raw IMAP over TLS, newest messages first.
//!
//! Blocking socket work runs in `spawn_blocking`; a malformed message is
//! skipped, never fatal for the whole fetch.

use std::io::Write as IoWrite;
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::MailConfig;
use crate::error::ChannelError;
use crate::ingest::normalize;
use crate::mail::{Inbox, InboundEmail};

/// Error type for blocking IMAP operations.
type ImapError = Box<dyn std::error::Error + Send + Sync>;

type TlsStream = rustls::StreamOwned<rustls::ClientConnection, TcpStream>;

/// IMAP-backed inbox.
pub struct ImapInbox {
    config: MailConfig,
}

impl ImapInbox {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Inbox for ImapInbox {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<InboundEmail>, ChannelError> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || fetch_recent_imap(&config, limit))
            .await
            .map_err(|e| ChannelError::FetchFailed {
                name: "imap".into(),
                reason: format!("fetch task panicked: {e}"),
            })?
            .map_err(|e| ChannelError::FetchFailed {
                name: "imap".into(),
                reason: e.to_string(),
            })
    }

    async fn mark_seen(&self, uid: &str) -> Result<(), ChannelError> {
        let config = self.config.clone();
        let uid = uid.to_string();
        tokio::task::spawn_blocking(move || mark_seen_imap(&config, &uid))
            .await
            .map_err(|e| ChannelError::FetchFailed {
                name: "imap".into(),
                reason: format!("store task panicked: {e}"),
            })?
            .map_err(|e| ChannelError::FetchFailed {
                name: "imap".into(),
                reason: e.to_string(),
            })
    }
}

/// Connect to the IMAP host over TLS via rustls.
fn connect_tls(config: &MailConfig) -> Result<TlsStream, ImapError> {
    let tcp = TcpStream::connect((&*config.imap_host, config.imap_port))?;
    tcp.set_read_timeout(Some(Duration::from_secs(30)))?;

    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = Arc::new(
        rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth(),
    );
    let server_name: rustls::pki_types::ServerName<'_> =
        rustls::pki_types::ServerName::try_from(config.imap_host.clone())?;
    let conn = rustls::ClientConnection::new(tls_config, server_name)?;
    Ok(rustls::StreamOwned::new(conn, tcp))
}

fn read_line(tls: &mut TlsStream) -> Result<String, ImapError> {
    let mut buf = Vec::new();
    loop {
        let mut byte = [0u8; 1];
        match std::io::Read::read(tls, &mut byte) {
            Ok(0) => return Err("IMAP connection closed".into()),
            Ok(_) => {
                buf.push(byte[0]);
                if buf.ends_with(b"\r\n") {
                    return Ok(String::from_utf8_lossy(&buf).to_string());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn send_cmd(tls: &mut TlsStream, tag: &str, cmd: &str) -> Result<Vec<String>, ImapError> {
    let full = format!("{tag} {cmd}\r\n");
    IoWrite::write_all(tls, full.as_bytes())?;
    IoWrite::flush(tls)?;
    let mut lines = Vec::new();
    loop {
        let line = read_line(tls)?;
        let done = line.starts_with(tag);
        lines.push(line);
        if done {
            break;
        }
    }
    Ok(lines)
}

/// Open a session: greeting, LOGIN, SELECT INBOX.
fn open_session(config: &MailConfig) -> Result<TlsStream, ImapError> {
    let mut tls = connect_tls(config)?;
    let _greeting = read_line(&mut tls)?;

    let login_resp = send_cmd(
        &mut tls,
        "A1",
        &format!("LOGIN \"{}\" \"{}\"", config.username, config.password),
    )?;
    if !login_resp.last().is_some_and(|l| l.contains("OK")) {
        return Err("IMAP login failed".into());
    }

    let _select = send_cmd(&mut tls, "A2", "SELECT \"INBOX\"")?;
    Ok(tls)
}

/// Fetch the most recent messages in INBOX (blocking — run in spawn_blocking).
fn fetch_recent_imap(config: &MailConfig, limit: usize) -> Result<Vec<InboundEmail>, ImapError> {
    let mut tls = open_session(config)?;

    let search_resp = send_cmd(&mut tls, "A3", "SEARCH ALL")?;
    let mut ids: Vec<String> = Vec::new();
    for line in &search_resp {
        if line.starts_with("* SEARCH") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() > 2 {
                ids.extend(parts[2..].iter().map(|s| s.to_string()));
            }
        }
    }

    // Newest first, with headroom for messages that fail to fetch or parse.
    let window_start = ids.len().saturating_sub(limit * 2);
    let mut results = Vec::new();
    let mut tag_counter = 4_u32;

    for uid in ids[window_start..].iter().rev() {
        if results.len() >= limit {
            break;
        }

        let fetch_tag = format!("A{tag_counter}");
        tag_counter += 1;
        let fetch_resp = match send_cmd(&mut tls, &fetch_tag, &format!("FETCH {uid} RFC822")) {
            Ok(resp) => resp,
            Err(e) => {
                warn!(uid = %uid, "Skipping message, fetch failed: {e}");
                continue;
            }
        };

        let raw: String = fetch_resp
            .iter()
            .skip(1)
            .take(fetch_resp.len().saturating_sub(2))
            .cloned()
            .collect();

        let Some(parsed) = normalize::parse_message(raw.as_bytes()) else {
            debug!(uid = %uid, "Skipping unparseable message");
            continue;
        };

        results.push(InboundEmail {
            subject: normalize::decoded_subject(&parsed),
            body: normalize::plain_text_body(&parsed),
            message_id: parsed.message_id().unwrap_or_default().to_string(),
            uid: uid.clone(),
        });
    }

    let logout_tag = format!("A{tag_counter}");
    let _ = send_cmd(&mut tls, &logout_tag, "LOGOUT");

    debug!("Fetched {} recent messages", results.len());
    Ok(results)
}

/// Mark one message \Seen (blocking — run in spawn_blocking).
fn mark_seen_imap(config: &MailConfig, uid: &str) -> Result<(), ImapError> {
    let mut tls = open_session(config)?;
    send_cmd(&mut tls, "A3", &format!("STORE {uid} +FLAGS (\\Seen)"))?;
    let _ = send_cmd(&mut tls, "A4", "LOGOUT");
    Ok(())
}
