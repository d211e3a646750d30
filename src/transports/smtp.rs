//! SMTP transport using lettre.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailroom::Mailer;
//! use mailroom::transports::SmtpTransport;
//!
//! // With authentication
//! let transport = SmtpTransport::new("smtp.example.com", 587)
//!     .credentials("username", "password")
//!     .from("noreply@example.com")
//!     .build();
//!
//! // Without authentication (local relay)
//! let transport = SmtpTransport::localhost();
//!
//! let mailer = Mailer::new(transport);
//! ```

use async_trait::async_trait;
use lettre::{
    address::Envelope,
    message::{
        header::{ContentType, HeaderName, HeaderValue},
        Attachment as LettreAttachment, Mailbox, MultiPart, SinglePart,
    },
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::error::MailError;
use crate::message::{BodyPart, RawEmail, SentMessage, TEXT_PLAIN};
use crate::role::Role;
use crate::transport::Transport;

/// SMTP transport.
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// Sender of raw emails, which carry no sender of their own.
    raw_from: Option<String>,
    /// TLS mode actually in effect.
    tls: TlsMode,
}

impl SmtpTransport {
    /// Create a new SMTP transport builder with TLS (STARTTLS on port 587).
    pub fn new(host: &str, port: u16) -> SmtpBuilder {
        SmtpBuilder {
            host: host.to_string(),
            port,
            credentials: None,
            tls: TlsMode::StartTls,
            raw_from: None,
        }
    }

    /// Create a new SMTP transport for localhost (no TLS, no auth).
    pub fn localhost() -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous("localhost")
            .port(25)
            .build();

        Self {
            transport,
            raw_from: None,
            tls: TlsMode::None,
        }
    }

    /// The TLS mode in effect, which is `None` if TLS could not be set up.
    pub fn tls_mode(&self) -> TlsMode {
        self.tls
    }

    /// Build a lettre Message from a per-recipient message.
    fn build_message(&self, message: &SentMessage) -> Result<Message, MailError> {
        let to = role_to_mailbox(&message.to)?;
        let mut builder = Message::builder()
            .from(role_to_mailbox(&message.from)?)
            .to(to.clone())
            .subject(&message.subject);

        // The return path is the envelope sender; bounces go there.
        if let Some(ref return_path) = message.return_path {
            let envelope = Envelope::new(Some(return_path.parse()?), vec![to.email])?;
            builder = builder.envelope(envelope);
        }

        let built = match message.body_parts.as_slice() {
            [] => builder
                .header(ContentType::TEXT_PLAIN)
                .body(String::new())?,
            [part] if !part.is_attachment() => builder
                .header(content_type(part))
                .body(String::from_utf8_lossy(&part.content).into_owned())?,
            [first, rest @ ..] => {
                let mut multipart = MultiPart::mixed().singlepart(single_part(first));
                for part in rest {
                    multipart = multipart.singlepart(single_part(part));
                }
                builder.multipart(multipart)?
            }
        };

        Ok(built)
    }

    /// Build a lettre Message from a raw email.
    fn build_raw(&self, email: &RawEmail) -> Result<Message, MailError> {
        let from = self.raw_from.as_deref().ok_or_else(|| {
            MailError::Configuration("SMTP raw emails need a `from` address".into())
        })?;

        let mut builder = Message::builder()
            .from(from.parse::<Mailbox>()?)
            .to(email.recipient.parse::<Mailbox>()?)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN);
        for header in parse_raw_headers(&email.headers)? {
            builder = builder.raw_header(header);
        }

        Ok(builder.body(email.body.clone())?)
    }

    async fn hand_over(&self, built: Result<Message, MailError>, to: &str) -> bool {
        let message = match built {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(to = %to, error = %e, "Failed to build SMTP message");
                return false;
            }
        };

        match self.transport.send(message).await {
            Ok(response) => {
                tracing::debug!(to = %to, code = %response.code(), "SMTP server accepted message");
                true
            }
            Err(e) => {
                tracing::error!(to = %to, error = %e, "SMTP delivery failed");
                false
            }
        }
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn dispatch(&self, message: &SentMessage) -> bool {
        self.hand_over(self.build_message(message), message.to.address())
            .await
    }

    async fn dispatch_raw(&self, email: &RawEmail) -> bool {
        self.hand_over(self.build_raw(email), &email.recipient).await
    }

    fn transport_name(&self) -> &'static str {
        "smtp"
    }
}

/// TLS mode for SMTP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// No TLS (dangerous, only for localhost)
    None,
    /// STARTTLS - upgrade to TLS after connecting (port 587)
    StartTls,
    /// Implicit TLS - connect with TLS from start (port 465)
    Tls,
}

/// Builder for SmtpTransport.
pub struct SmtpBuilder {
    host: String,
    port: u16,
    credentials: Option<Credentials>,
    tls: TlsMode,
    raw_from: Option<String>,
}

impl SmtpBuilder {
    /// Set SMTP credentials.
    pub fn credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials::new(username.to_string(), password.to_string()));
        self
    }

    /// Set TLS mode.
    pub fn tls(mut self, mode: TlsMode) -> Self {
        self.tls = mode;
        self
    }

    /// Disable TLS (dangerous, only for localhost/testing).
    pub fn no_tls(mut self) -> Self {
        self.tls = TlsMode::None;
        self
    }

    /// Set the sender used for raw emails.
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.raw_from = Some(address.into());
        self
    }

    /// Build the SmtpTransport.
    pub fn build(self) -> SmtpTransport {
        let secured = match self.tls {
            TlsMode::None => None,
            TlsMode::StartTls => {
                Some(AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host))
            }
            TlsMode::Tls => Some(AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)),
        };

        let (builder, tls) = match secured {
            None => (
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host),
                TlsMode::None,
            ),
            Some(Ok(builder)) => (builder, self.tls),
            Some(Err(e)) => {
                tracing::warn!(
                    host = %self.host,
                    requested = ?self.tls,
                    error = %e,
                    "TLS setup failed, falling back to an unencrypted SMTP connection"
                );
                (
                    AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host),
                    TlsMode::None,
                )
            }
        };

        let mut builder = builder.port(self.port);
        if let Some(creds) = self.credentials {
            builder = builder.credentials(creds);
        }

        SmtpTransport {
            transport: builder.build(),
            raw_from: self.raw_from,
            tls,
        }
    }
}

/// Convert a Role to lettre's Mailbox.
fn role_to_mailbox(role: &Role) -> Result<Mailbox, MailError> {
    let email = role.address().parse()?;
    let name = Some(role.name().to_string()).filter(|n| !n.is_empty());

    Ok(Mailbox::new(name, email))
}

/// Parse pre-rendered `Name: value` lines into lettre headers.
fn parse_raw_headers(headers: &str) -> Result<Vec<HeaderValue>, MailError> {
    headers
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (name, value) = line.split_once(':').ok_or_else(|| {
                MailError::InvalidInput(format!("malformed raw header line: {:?}", line))
            })?;
            let name = HeaderName::new_from_ascii(name.trim().to_string()).map_err(|e| {
                MailError::InvalidInput(format!("invalid raw header name {:?}: {}", name, e))
            })?;
            Ok(HeaderValue::new(name, value.trim().to_string()))
        })
        .collect()
}

fn content_type(part: &BodyPart) -> ContentType {
    let raw = match (&part.charset, part.content_type.as_str()) {
        (Some(charset), TEXT_PLAIN) => format!("{}; charset={}", TEXT_PLAIN, charset),
        (_, other) => other.to_string(),
    };

    ContentType::parse(&raw).unwrap_or(ContentType::TEXT_PLAIN)
}

fn single_part(part: &BodyPart) -> SinglePart {
    match part.file_name {
        Some(ref file_name) => {
            LettreAttachment::new(file_name.clone()).body(part.content.clone(), content_type(part))
        }
        None => SinglePart::builder()
            .header(content_type(part))
            .body(String::from_utf8_lossy(&part.content).into_owned()),
    }
}
