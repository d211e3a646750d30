//! # Mailroom
//!
//! Compose, validate, and dispatch emails in Rust. One message per recipient,
//! over a pluggable transport.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mailroom::{Email, Mailer, Role};
//! use mailroom::transports::LoggerTransport;
//!
//! let mailer = Mailer::new(LoggerTransport::new());
//!
//! let email = Email::new()
//!     .sender(Role::new("Shop", "shop@example.com")?)
//!     .recipient(Role::new("John Doe", "john@example.com")?)
//!     .recipient(Role::new("Jane Doe", "jane@example.com")?)
//!     .subject("Your order")
//!     .plain_body("Thanks for ordering.\r\n\r\n\r\nSee you soon.");
//!
//! // Two recipients: two transport calls, each with a single `to`.
//! mailer.send(&email).await?;
//! ```
//!
//! ## Global Mailer
//!
//! Send from anywhere without passing a mailer around:
//!
//! ```rust,ignore
//! mailroom::send(&email).await?;
//! mailroom::send_email("john@example.com", "Hi", "Hello", "").await?;
//! ```
//!
//! The global mailer is built from environment variables on first use, or set
//! with [`configure`]. In tests, [`enable_test_mode`] swaps in a
//! [`RecordingTransport`](transports::RecordingTransport).
//!
//! ## Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `MAIL_TRANSPORT` | `logger` (default), `logger_full`, `recording`, `smtp` |
//! | `MAIL_FORMATTING` | `0`, `false`, `off` or `no` disables line-ending normalization |
//! | `MAIL_CHARSET` | Character set of plain text parts (default: `utf-8`) |
//! | `MAIL_FROM` | Sender of raw emails over SMTP |
//! | `SMTP_HOST` | SMTP server host |
//! | `SMTP_PORT` | SMTP server port (default: 587) |
//! | `SMTP_USERNAME` | SMTP username |
//! | `SMTP_PASSWORD` | SMTP password |
//!
//! ## Feature Flags
//!
//! - `smtp` - SMTP transport via lettre

/// The version of the mailroom crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod attachment;
mod email;
mod error;
mod formatter;
mod mailer;
mod message;
mod role;
mod transport;

pub mod testing;
pub mod transports;

use parking_lot::RwLock;
use std::env;
use std::sync::Arc;

// Re-exports
pub use attachment::{Attachment, AttachmentSource};
pub use email::Email;
pub use error::MailError;
pub use formatter::normalize;
pub use mailer::{validate, Mailer, DEFAULT_CHARSET};
pub use message::{BodyPart, RawEmail, SentMessage, TEXT_HTML, TEXT_PLAIN};
pub use role::{Role, ToRole};
pub use transport::Transport;

/// A mailer over a transport chosen at runtime.
pub type DynMailer = Mailer<Arc<dyn Transport>>;

// ============================================================================
// Global Mailer Configuration
// ============================================================================

/// Global mailer - swappable for testing
static MAILER: RwLock<Option<Arc<DynMailer>>> = RwLock::new(None);

/// Whether plain text formatting is enabled by environment.
fn formatting_from_env() -> bool {
    match env::var("MAIL_FORMATTING") {
        Ok(value) => !matches!(
            value.trim().to_lowercase().as_str(),
            "0" | "false" | "off" | "no"
        ),
        Err(_) => true,
    }
}

/// Charset for plain text parts from environment.
fn charset_from_env() -> String {
    env::var("MAIL_CHARSET")
        .ok()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
}

/// Create the transport named by `MAIL_TRANSPORT`.
fn create_transport_from_env() -> Result<Arc<dyn Transport>, MailError> {
    let name = env::var("MAIL_TRANSPORT")
        .map(|t| t.to_lowercase())
        .unwrap_or_else(|_| "logger".to_string());

    match name.as_str() {
        #[cfg(feature = "smtp")]
        "smtp" => {
            let host = env::var("SMTP_HOST")
                .map_err(|_| MailError::Configuration("SMTP_HOST not set".into()))?;
            let port: u16 = match env::var("SMTP_PORT") {
                Ok(port) => port.parse().map_err(|_| {
                    MailError::Configuration(format!("Invalid SMTP_PORT: {}", port))
                })?,
                Err(_) => 587,
            };
            let username = env::var("SMTP_USERNAME").unwrap_or_default();
            let password = env::var("SMTP_PASSWORD").unwrap_or_default();

            let mut builder = transports::SmtpTransport::new(&host, port);
            if !username.is_empty() {
                builder = builder.credentials(&username, &password);
            }
            if let Ok(from) = env::var("MAIL_FROM") {
                builder = builder.from(from);
            }
            Ok(Arc::new(builder.build()))
        }
        #[cfg(not(feature = "smtp"))]
        "smtp" => Err(MailError::Configuration(
            "MAIL_TRANSPORT=smtp but 'smtp' feature is not enabled. \
            Add `features = [\"smtp\"]` to Cargo.toml"
                .into(),
        )),

        "logger" => Ok(Arc::new(transports::LoggerTransport::new())),
        "logger_full" => Ok(Arc::new(transports::LoggerTransport::full())),
        "recording" => Ok(Arc::new(transports::RecordingTransport::new())),

        _ => Err(MailError::Configuration(format!(
            "Unknown MAIL_TRANSPORT: {}. Valid transports are: smtp, logger, logger_full, recording",
            name
        ))),
    }
}

/// Create a mailer from environment variables.
pub fn mailer_from_env() -> Result<DynMailer, MailError> {
    let transport = create_transport_from_env()?;
    tracing::debug!(
        transport = transport.transport_name(),
        "Configured mail transport from environment"
    );

    Ok(Mailer::new(transport)
        .formatting(formatting_from_env())
        .charset(charset_from_env()))
}

/// Get or initialize the global mailer.
fn get_mailer() -> Result<Arc<DynMailer>, MailError> {
    // Fast path: already configured
    if let Some(ref mailer) = *MAILER.read() {
        return Ok(Arc::clone(mailer));
    }

    // Slow path: need to configure
    let mailer = Arc::new(mailer_from_env()?);
    let mut guard = MAILER.write();

    // Double-check after acquiring write lock
    Ok(Arc::clone(guard.get_or_insert(mailer)))
}

/// Initialize the global mailer from environment variables.
///
/// Call this at startup to surface configuration errors early.
pub fn init() -> Result<(), MailError> {
    get_mailer().map(|_| ())
}

/// Send an email using the global mailer.
///
/// See [`Mailer::send`].
pub async fn send(email: &Email) -> Result<(), MailError> {
    get_mailer()?.send(email).await
}

/// Send a raw email using the global mailer.
///
/// Returns the transport's answer. Fails only if the global mailer cannot be
/// configured; see [`Mailer::send_email`].
pub async fn send_email(
    address: &str,
    subject: &str,
    body: &str,
    headers: &str,
) -> Result<bool, MailError> {
    Ok(get_mailer()?
        .send_email(address, subject, body, headers)
        .await)
}

// ============================================================================
// Manual Configuration (for testing or custom setups)
// ============================================================================

/// Manually configure the global mailer.
///
/// Later calls replace the previous mailer.
///
/// ```rust,ignore
/// use mailroom::{configure, Mailer};
/// use mailroom::transports::LoggerTransport;
///
/// configure(Mailer::new(Arc::new(LoggerTransport::full()) as _));
/// ```
pub fn configure(mailer: DynMailer) {
    configure_arc(Arc::new(mailer));
}

/// Configure with an Arc'd mailer.
pub fn configure_arc(mailer: Arc<DynMailer>) {
    *MAILER.write() = Some(mailer);
}

/// Route the global mailer to a fresh recording transport.
///
/// Returns a handle to the transport for assertions. Formatting and charset
/// still follow the environment.
pub fn enable_test_mode() -> transports::RecordingTransport {
    let transport = transports::RecordingTransport::new();
    configure(
        Mailer::new(Arc::new(transport.clone()) as Arc<dyn Transport>)
            .formatting(formatting_from_env())
            .charset(charset_from_env()),
    );
    transport
}

/// Reset the global mailer (useful for tests).
///
/// After calling this, the next send re-initializes from env vars.
pub fn reset() {
    *MAILER.write() = None;
}

/// Get the configured global mailer (if initialized).
pub fn mailer() -> Option<Arc<DynMailer>> {
    MAILER.read().as_ref().cloned()
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Attachment;
    pub use crate::Email;
    pub use crate::MailError;
    pub use crate::Mailer;
    pub use crate::Role;
    pub use crate::SentMessage;
    pub use crate::ToRole;
    pub use crate::Transport;
    pub use crate::{normalize, send, send_email};
}
