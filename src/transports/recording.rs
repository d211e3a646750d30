//! Recording transport for testing.
//!
//! Captures every message instead of delivering it, so tests can assert on
//! what a [`Mailer`](crate::Mailer) would have sent.
//!
//! ```rust,ignore
//! use mailroom::Mailer;
//! use mailroom::transports::RecordingTransport;
//!
//! #[tokio::test]
//! async fn test_sends_welcome_email() {
//!     let mailer = Mailer::new(RecordingTransport::new());
//!
//!     // Code under test
//!     send_welcome_email(&mailer, "user@example.com").await;
//!
//!     let message = mailer.transport().last_sent_message().unwrap();
//!     assert_eq!(message.to.address(), "user@example.com");
//! }
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::message::{RawEmail, SentMessage};
use crate::transport::Transport;

#[derive(Debug)]
struct Recording {
    messages: Vec<SentMessage>,
    raw_emails: Vec<RawEmail>,
    faked_return_value: bool,
}

impl Default for Recording {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            raw_emails: Vec::new(),
            faked_return_value: true,
        }
    }
}

/// Transport that records messages in memory instead of delivering them.
///
/// Clones share the same recording, so a clone can be handed to a mailer
/// while the test keeps another one for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    recording: Arc<Mutex<Recording>>,
}

impl RecordingTransport {
    /// Create a transport with an empty recording that reports success.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Return Value Simulation (for testing)
    // =========================================================================

    /// Set the value returned by `dispatch_raw` and `dispatch`.
    ///
    /// Calls are still recorded, whatever the value. Useful for testing the
    /// failure branch of callers.
    ///
    /// ```rust,ignore
    /// let transport = RecordingTransport::new();
    /// transport.set_faked_return_value(false);
    ///
    /// let mailer = Mailer::new(transport.clone());
    /// assert!(!mailer.send_email("john@example.com", "Hi", "Hello", "").await);
    /// ```
    pub fn set_faked_return_value(&self, value: bool) {
        self.recording.lock().faked_return_value = value;
    }

    /// The value currently returned by `dispatch_raw` and `dispatch`.
    pub fn faked_return_value(&self) -> bool {
        self.recording.lock().faked_return_value
    }

    // =========================================================================
    // Message Access (for testing assertions)
    // =========================================================================

    /// The most recently dispatched message.
    pub fn last_sent_message(&self) -> Option<SentMessage> {
        self.recording.lock().messages.last().cloned()
    }

    /// The first dispatched message.
    pub fn first_sent_message(&self) -> Option<SentMessage> {
        self.recording.lock().messages.first().cloned()
    }

    /// All dispatched messages, oldest first.
    pub fn all_sent_messages(&self) -> Vec<SentMessage> {
        self.recording.lock().messages.clone()
    }

    /// The number of dispatched messages.
    pub fn count_sent_messages(&self) -> usize {
        self.recording.lock().messages.len()
    }

    /// Find dispatched messages matching a predicate.
    pub fn find_messages<F>(&self, predicate: F) -> Vec<SentMessage>
    where
        F: Fn(&SentMessage) -> bool,
    {
        self.recording
            .lock()
            .messages
            .iter()
            .filter(|m| predicate(m))
            .cloned()
            .collect()
    }

    /// Check if a message was dispatched to a specific address.
    pub fn sent_to(&self, address: &str) -> bool {
        self.recording
            .lock()
            .messages
            .iter()
            .any(|m| m.to.address().eq_ignore_ascii_case(address))
    }

    // =========================================================================
    // Raw Email Access (for testing assertions)
    // =========================================================================

    /// The most recent raw email.
    pub fn last_raw_email(&self) -> Option<RawEmail> {
        self.recording.lock().raw_emails.last().cloned()
    }

    /// All raw emails, oldest first.
    pub fn all_raw_emails(&self) -> Vec<RawEmail> {
        self.recording.lock().raw_emails.clone()
    }

    /// Recipient of the last raw email, or an empty string.
    pub fn last_recipient(&self) -> String {
        self.last_raw_field(|raw| &raw.recipient)
    }

    /// Subject of the last raw email, or an empty string.
    pub fn last_subject(&self) -> String {
        self.last_raw_field(|raw| &raw.subject)
    }

    /// Body of the last raw email, or an empty string.
    pub fn last_body(&self) -> String {
        self.last_raw_field(|raw| &raw.body)
    }

    /// Headers of the last raw email, or an empty string.
    pub fn last_headers(&self) -> String {
        self.last_raw_field(|raw| &raw.headers)
    }

    fn last_raw_field(&self, field: impl Fn(&RawEmail) -> &String) -> String {
        self.recording
            .lock()
            .raw_emails
            .last()
            .map(|raw| field(raw).clone())
            .unwrap_or_default()
    }

    /// Forget everything recorded and restore the default return value.
    pub fn clean_up(&self) {
        *self.recording.lock() = Recording::default();
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn dispatch(&self, message: &SentMessage) -> bool {
        let mut recording = self.recording.lock();
        recording.messages.push(message.clone());
        recording.faked_return_value
    }

    async fn dispatch_raw(&self, email: &RawEmail) -> bool {
        let mut recording = self.recording.lock();
        recording.raw_emails.push(email.clone());
        recording.faked_return_value
    }

    fn transport_name(&self) -> &'static str {
        "recording"
    }
}
