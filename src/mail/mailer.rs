use std::sync::Arc;

use anyhow::{Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{info, warn};

use super::{ContactMessage, CONTACT_SUBJECT};
use crate::config::Config;

/// SMTP delivery of contact messages to the operator's own address.
///
/// Without credentials the mailer runs in no-op mode and only logs.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    operator: Option<Mailbox>,
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("enabled", &self.is_enabled())
            .field("operator", &self.operator)
            .finish()
    }
}

impl Mailer {
    /// Build the mailer from configuration.
    ///
    /// Port 465 uses implicit TLS; any other port uses STARTTLS.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator address is malformed or the relay
    /// cannot be configured.
    pub fn new(config: &Config) -> Result<Self> {
        let (Some(address), Some(password)) = (&config.mail_address, &config.mail_password) else {
            warn!("EMAIL_KEY/PASSWORD_KEY not set; contact messages will only be logged");
            return Ok(Self::disabled());
        };

        let operator: Mailbox = address
            .parse()
            .with_context(|| format!("Invalid EMAIL_KEY address: {address}"))?;

        let builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .context("Failed to configure SMTP transport")?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(address.clone(), password.clone()))
            .timeout(Some(config.smtp_timeout))
            .build();

        info!(host = %config.smtp_host, port = config.smtp_port, "SMTP mailer configured");

        Ok(Self {
            transport: Some(Arc::new(transport)),
            operator: Some(operator),
        })
    }

    /// A mailer that never sends.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            transport: None,
            operator: None,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Build the email for a contact message, from and to the operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be assembled.
    pub fn compose(operator: &Mailbox, contact: &ContactMessage) -> Result<Message> {
        Message::builder()
            .from(operator.clone())
            .to(operator.clone())
            .subject(CONTACT_SUBJECT)
            .header(header::ContentType::TEXT_PLAIN)
            .body(contact.body())
            .context("Failed to build contact email")
    }

    /// Deliver one contact message.
    ///
    /// # Errors
    ///
    /// Returns an error if composing or sending fails.
    pub async fn send_contact(&self, contact: &ContactMessage) -> Result<()> {
        let (Some(transport), Some(operator)) = (&self.transport, &self.operator) else {
            info!(
                from_name = %contact.name,
                from_email = %contact.email,
                "Mailer in no-op mode; skipping contact email"
            );
            return Ok(());
        };

        let email = Self::compose(operator, contact)?;
        transport
            .send(email)
            .await
            .context("Failed to send contact email")?;

        info!(from_email = %contact.email, "Contact email sent");
        Ok(())
    }
}
