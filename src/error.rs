//! Error types for mailroom.

use thiserror::Error;

/// Errors that can occur when composing or sending emails.
///
/// Transport refusals are not errors: [`Transport`](crate::Transport) methods
/// report them as `false`.
#[derive(Debug, Clone, Error)]
pub enum MailError {
    /// A required field is missing or malformed. The message names the field.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Attachment file not found.
    #[error("Attachment file not found: {0}")]
    AttachmentFileNotFound(String),

    /// Failed to read attachment file.
    #[error("Failed to read attachment: {0}")]
    AttachmentReadError(String),

    /// Configuration error (missing env var, invalid value, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A transport adapter could not build or hand over a message.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl MailError {
    /// Create an `InvalidInput` error for a field that must not be empty.
    pub fn empty(field: &str) -> Self {
        Self::InvalidInput(format!("`{}` must not be empty", field))
    }

    /// Whether this error came from reading attachment content.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::AttachmentFileNotFound(_) | Self::AttachmentReadError(_)
        )
    }
}

#[cfg(feature = "smtp")]
impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(feature = "smtp")]
impl From<lettre::address::AddressError> for MailError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
