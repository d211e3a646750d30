//! Logger transport that only logs messages.
//!
//! Useful for staging environments or when you want to see what would be sent
//! without actually delivering anything.

use async_trait::async_trait;

use crate::message::{RawEmail, SentMessage};
use crate::transport::Transport;

/// Transport that emits tracing events instead of delivering.
#[derive(Debug, Clone, Default)]
pub struct LoggerTransport {
    /// If true, log full message details. If false, just log a summary.
    log_full: bool,
}

impl LoggerTransport {
    /// Create a logger transport with brief output.
    pub fn new() -> Self {
        Self { log_full: false }
    }

    /// Create a logger transport with full message details.
    pub fn full() -> Self {
        Self { log_full: true }
    }

    /// Set whether to log full message details.
    pub fn log_full(mut self, full: bool) -> Self {
        self.log_full = full;
        self
    }
}

#[async_trait]
impl Transport for LoggerTransport {
    async fn dispatch(&self, message: &SentMessage) -> bool {
        let message_id = uuid::Uuid::new_v4().to_string();

        if self.log_full {
            let attachments: Vec<&str> = message
                .body_parts
                .iter()
                .filter_map(|p| p.file_name.as_deref())
                .collect();

            tracing::info!(
                message_id = %message_id,
                from = %message.from,
                to = %message.to,
                subject = %message.subject,
                return_path = ?message.return_path,
                parts = message.body_parts.len(),
                attachments = ?attachments,
                "Message logged (full)"
            );

            for part in &message.body_parts {
                if let Some(text) = part.text().filter(|_| !part.is_attachment()) {
                    tracing::debug!(content_type = %part.content_type, body = %text, "Body part");
                }
            }
        } else {
            tracing::info!(
                message_id = %message_id,
                to = %message.to.address(),
                subject = %message.subject,
                "Message logged"
            );
        }

        true
    }

    async fn dispatch_raw(&self, email: &RawEmail) -> bool {
        let message_id = uuid::Uuid::new_v4().to_string();

        tracing::info!(
            message_id = %message_id,
            to = %email.recipient,
            subject = %email.subject,
            "Raw email logged"
        );
        if self.log_full {
            tracing::debug!(headers = %email.headers, body = %email.body, "Raw email body");
        }

        true
    }

    fn transport_name(&self) -> &'static str {
        "logger"
    }
}
