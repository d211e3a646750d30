//! Transport implementations.
//!
//! Each transport implements the [`Transport`](crate::Transport) trait.
//!
//! ## Available Transports
//!
//! | Transport | Feature Flag | Description |
//! |-----------|-------------|-------------|
//! | [`SmtpTransport`] | `smtp` | SMTP via lettre |
//! | [`LoggerTransport`] | (none) | Logs messages without delivering |
//! | [`RecordingTransport`] | (none) | Records messages in memory for tests |

#[cfg(feature = "smtp")]
mod smtp;
#[cfg(feature = "smtp")]
pub use smtp::{SmtpBuilder, SmtpTransport, TlsMode};

mod logger;
pub use logger::LoggerTransport;

mod recording;
pub use recording::RecordingTransport;
