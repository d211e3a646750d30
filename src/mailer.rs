//! The mailer: validates emails, splits them into per-recipient messages and
//! hands those to a [`Transport`].

use tracing::Instrument;

use crate::email::Email;
use crate::error::MailError;
use crate::formatter::normalize;
use crate::message::{BodyPart, RawEmail, SentMessage};
use crate::role::Role;
use crate::transport::Transport;

/// Character set used for plain text parts unless configured otherwise.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Dispatches emails through a pluggable transport.
///
/// Holds no history: sent messages belong to the transport.
///
/// # Example
///
/// ```rust,ignore
/// use mailroom::{Email, Mailer, Role};
/// use mailroom::transports::RecordingTransport;
///
/// let mailer = Mailer::new(RecordingTransport::new());
///
/// let email = Email::new()
///     .sender(Role::address_only("shop@example.com")?)
///     .recipient(Role::new("John Doe", "john@example.com")?)
///     .subject("Your order")
///     .plain_body("Thanks!");
///
/// mailer.send(&email).await?;
/// assert_eq!(mailer.transport().count_sent_messages(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Mailer<T> {
    transport: T,
    formatting: bool,
    charset: String,
}

impl<T: Transport> Mailer<T> {
    /// Create a mailer with formatting enabled and the default charset.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            formatting: true,
            charset: DEFAULT_CHARSET.to_string(),
        }
    }

    /// Enable or disable line-ending normalization of plain text bodies.
    pub fn formatting(mut self, enabled: bool) -> Self {
        self.formatting = enabled;
        self
    }

    /// Set the character set announced for plain text parts.
    ///
    /// The mailer does not compute this; it comes from the hosting
    /// environment's locale configuration.
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Enable or disable line-ending normalization of plain text bodies.
    pub fn set_formatting(&mut self, enabled: bool) {
        self.formatting = enabled;
    }

    /// Check if plain text bodies are normalized.
    pub fn is_formatting_enabled(&self) -> bool {
        self.formatting
    }

    /// The character set announced for plain text parts.
    pub fn charset_name(&self) -> &str {
        &self.charset
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a simple mail without building an [`Email`].
    ///
    /// Nothing is validated here. The body is normalized when formatting is
    /// enabled, and the transport's answer is returned as is.
    pub async fn send_email(
        &self,
        address: &str,
        subject: &str,
        body: &str,
        headers: &str,
    ) -> bool {
        let body = if self.formatting {
            normalize(body)
        } else {
            body.to_string()
        };
        let raw = RawEmail::new(address, subject, body, headers);

        let sent = self.transport.dispatch_raw(&raw).await;
        tracing::debug!(
            transport = self.transport.transport_name(),
            recipient = %address,
            sent,
            "Raw email dispatched"
        );
        sent
    }

    /// Validate an email and send one message per recipient.
    ///
    /// Validation and attachment reading happen before the first transport
    /// call, so an error means nothing was sent. A recipient the transport
    /// refuses is logged and skipped; the remaining recipients are still
    /// attempted and the call still succeeds.
    ///
    /// One call dispatches its messages sequentially, in recipient order.
    /// Concurrent calls on a shared mailer are not serialized: their messages
    /// may interleave at a transport that yields between dispatches.
    pub async fn send(&self, email: &Email) -> Result<(), MailError> {
        let messages = self.compose(email)?;
        let transport = self.transport.transport_name();

        let span = tracing::info_span!(
            "mailroom.send",
            transport = transport,
            recipients = messages.len(),
            subject = %email.subject,
        );

        async {
            let mut refused = 0usize;
            for message in &messages {
                tracing::debug!(to = %message.to.address(), "Dispatching message");
                if !self.transport.dispatch(message).await {
                    refused += 1;
                    tracing::warn!(to = %message.to.address(), "Transport refused message");
                }
            }
            tracing::info!(
                sent = messages.len() - refused,
                refused,
                "Email dispatched"
            );
        }
        .instrument(span)
        .await;

        Ok(())
    }

    /// Build the per-recipient messages for an email without sending them.
    pub fn compose(&self, email: &Email) -> Result<Vec<SentMessage>, MailError> {
        let sender = validated_sender(email)?;
        let body_parts = self.body_parts(email)?;

        Ok(email
            .recipients
            .iter()
            .map(|recipient| SentMessage {
                from: sender.clone(),
                to: recipient.clone(),
                subject: email.subject.clone(),
                body_parts: body_parts.clone(),
                return_path: email.return_path.clone(),
            })
            .collect())
    }

    /// Plain text, then HTML, then one part per attachment.
    fn body_parts(&self, email: &Email) -> Result<Vec<BodyPart>, MailError> {
        let mut parts = Vec::with_capacity(2 + email.attachments.len());

        if let Some(plain) = email.plain_body.as_deref().filter(|b| !b.is_empty()) {
            let plain = if self.formatting {
                normalize(plain)
            } else {
                plain.to_string()
            };
            parts.push(BodyPart::plain(plain, self.charset.as_str()));
        }

        if let Some(html) = email.html_body.as_deref().filter(|b| !b.is_empty()) {
            parts.push(BodyPart::html(html));
        }

        for attachment in &email.attachments {
            parts.push(BodyPart::attachment(
                attachment.resolve_bytes()?,
                attachment.content_type.as_str(),
                attachment.resolve_file_name(),
            ));
        }

        Ok(parts)
    }
}

/// Check the fields `send` requires, in order: sender, recipients, subject,
/// message content.
pub fn validate(email: &Email) -> Result<(), MailError> {
    validated_sender(email).map(|_| ())
}

/// Run every check and hand back the sender the messages are sent from.
fn validated_sender(email: &Email) -> Result<&Role, MailError> {
    let sender = email
        .sender
        .as_ref()
        .ok_or_else(|| MailError::empty("sender"))?;
    if email.recipients.is_empty() {
        return Err(MailError::empty("recipients"));
    }
    if email.subject.is_empty() {
        return Err(MailError::empty("subject"));
    }
    if email.subject.contains(['\r', '\n']) {
        return Err(MailError::InvalidInput(
            "`subject` must not contain line breaks or carriage returns".into(),
        ));
    }
    if !email.has_plain_body() && !email.has_html_body() {
        return Err(MailError::empty("message content"));
    }
    Ok(sender)
}
