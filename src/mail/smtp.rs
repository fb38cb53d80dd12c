//! SMTP outbound via lettre (STARTTLS submission).

use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::MailConfig;
use crate::error::ChannelError;
use crate::mail::Outbox;

/// Display name on outbound mail.
const FROM_NAME: &str = "Spanish Verb Trainer";

/// SMTP-backed outbox.
pub struct SmtpOutbox {
    config: MailConfig,
}

impl SmtpOutbox {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn send_blocking(
        &self,
        to: &str,
        subject: &str,
        plain: &str,
        html: Option<&str>,
    ) -> Result<(), ChannelError> {
        let creds = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let transport = SmtpTransport::starttls_relay(&self.config.smtp_host)
            .map_err(|e| ChannelError::SendFailed {
                name: "smtp".into(),
                reason: format!("SMTP relay error: {e}"),
            })?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();

        let builder = Message::builder()
            .from(
                format!("{FROM_NAME} <{}>", self.config.username)
                    .parse()
                    .map_err(|e| ChannelError::SendFailed {
                        name: "smtp".into(),
                        reason: format!("Invalid from address: {e}"),
                    })?,
            )
            .to(to.parse().map_err(|e| ChannelError::SendFailed {
                name: "smtp".into(),
                reason: format!("Invalid to address: {e}"),
            })?)
            .subject(subject);

        let email = match html {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                plain.to_string(),
                html.to_string(),
            )),
            None => builder.body(plain.to_string()),
        }
        .map_err(|e| ChannelError::SendFailed {
            name: "smtp".into(),
            reason: format!("Failed to build email: {e}"),
        })?;

        transport.send(&email).map_err(|e| ChannelError::SendFailed {
            name: "smtp".into(),
            reason: format!("SMTP send failed: {e}"),
        })?;

        info!("Email sent to {to}");
        Ok(())
    }
}

#[async_trait]
impl Outbox for SmtpOutbox {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        plain: &str,
        html: Option<&str>,
    ) -> Result<(), ChannelError> {
        let outbox = SmtpOutbox {
            config: self.config.clone(),
        };
        let (to, subject, plain) = (to.to_string(), subject.to_string(), plain.to_string());
        let html = html.map(str::to_string);
        tokio::task::spawn_blocking(move || {
            outbox.send_blocking(&to, &subject, &plain, html.as_deref())
        })
        .await
        .map_err(|e| ChannelError::SendFailed {
            name: "smtp".into(),
            reason: format!("send task panicked: {e}"),
        })?
    }
}
