//! Testing utilities and assertion helpers.
//!
//! Panicking assertions over a [`RecordingTransport`], with failure messages
//! that list what was actually sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailroom::Mailer;
//! use mailroom::testing::*;
//! use mailroom::transports::RecordingTransport;
//!
//! #[tokio::test]
//! async fn test_order_confirmation() {
//!     let transport = RecordingTransport::new();
//!     let mailer = Mailer::new(transport.clone());
//!
//!     // ... trigger email sending ...
//!
//!     assert_message_count(&transport, 1);
//!     assert_message_to(&transport, "user@example.com");
//!     assert_plain_body_contains(&transport, "Thanks");
//!     refute_message_to(&transport, "admin@example.com");
//!
//!     // Regex matching
//!     assert_plain_body_matches(&transport, r"Order #\d+");
//! }
//! ```

use regex::Regex;

use crate::message::{BodyPart, SentMessage};
use crate::transports::RecordingTransport;

// ============================================================================
// Helper Functions
// ============================================================================

/// Format a list of messages for error messages.
fn format_summary(messages: &[SentMessage]) -> String {
    if messages.is_empty() {
        return "  (no messages sent)".to_string();
    }

    messages
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "  {}. To: {}, From: {}, Subject: \"{}\", Parts: {}",
                i + 1,
                m.to.address(),
                m.from.address(),
                m.subject,
                m.body_parts.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn excerpt(text: &str) -> String {
    text.chars().take(500).collect()
}

/// Get the last message sent, or panic if none.
///
/// # Panics
///
/// Panics if no messages were sent.
pub fn last_message(transport: &RecordingTransport) -> SentMessage {
    transport
        .last_sent_message()
        .expect("Expected at least one message to be sent, but none were sent")
}

fn last_plain_body(transport: &RecordingTransport) -> (SentMessage, String) {
    let last = last_message(transport);
    let body = last
        .plain_part()
        .and_then(BodyPart::text)
        .unwrap_or("")
        .to_string();
    (last, body)
}

// ============================================================================
// Basic Assertions
// ============================================================================

/// Assert that at least one message was sent.
///
/// # Panics
///
/// Panics if no messages were sent.
pub fn assert_message_sent(transport: &RecordingTransport) {
    assert!(
        transport.count_sent_messages() > 0,
        "Expected at least one message to be sent, but none were sent"
    );
}

/// Assert that no messages were sent.
///
/// # Panics
///
/// Panics if any message was sent.
pub fn assert_no_messages_sent(transport: &RecordingTransport) {
    let messages = transport.all_sent_messages();
    assert!(
        messages.is_empty(),
        "Expected no messages to be sent, but {} were sent.\n\nMessages sent:\n{}",
        messages.len(),
        format_summary(&messages)
    );
}

/// Assert that exactly N messages were sent.
///
/// # Panics
///
/// Panics if the count doesn't match.
pub fn assert_message_count(transport: &RecordingTransport, expected: usize) {
    let messages = transport.all_sent_messages();
    assert!(
        messages.len() == expected,
        "Expected {} message(s) to be sent, but {} were sent.\n\nMessages sent:\n{}",
        expected,
        messages.len(),
        format_summary(&messages)
    );
}

/// Assert that a message was sent to a specific address.
///
/// # Panics
///
/// Panics if no message was sent to the address.
pub fn assert_message_to(transport: &RecordingTransport, address: &str) {
    assert!(
        transport.sent_to(address),
        "Expected a message to be sent to '{}'.\n\nMessages sent:\n{}",
        address,
        format_summary(&transport.all_sent_messages())
    );
}

/// Refute that a message was sent to a specific address.
///
/// # Panics
///
/// Panics if a message was sent to the address.
pub fn refute_message_to(transport: &RecordingTransport, address: &str) {
    let found = transport.find_messages(|m| m.to.address().eq_ignore_ascii_case(address));

    if let Some(found_message) = found.first() {
        panic!(
            "Expected no message to be sent to '{}', but found one.\n\nMatching message:\n  Subject: \"{}\"\n  From: {}\n\nAll messages:\n{}",
            address,
            found_message.subject,
            found_message.from.address(),
            format_summary(&transport.all_sent_messages())
        );
    }
}

/// Assert that a message with the exact subject was sent.
///
/// # Panics
///
/// Panics if no message with the subject was found.
pub fn assert_message_subject(transport: &RecordingTransport, subject: &str) {
    let found = transport.find_messages(|m| m.subject == subject);

    assert!(
        !found.is_empty(),
        "Expected a message with subject '{}'.\n\nMessages sent:\n{}",
        subject,
        format_summary(&transport.all_sent_messages())
    );
}

// ============================================================================
// Body Assertions
// ============================================================================

/// Assert the last message has a plain text body containing text.
///
/// # Panics
///
/// Panics if no message was sent or the plain text body doesn't contain text.
pub fn assert_plain_body_contains(transport: &RecordingTransport, text: &str) {
    let (last, body) = last_plain_body(transport);

    assert!(
        body.contains(text),
        "Expected plain text body to contain '{}', but it didn't.\n\nLast message:\n{}\n\nPlain text body (first 500 chars):\n{}",
        text,
        format_summary(&[last]),
        excerpt(&body)
    );
}

/// Assert the last message plain text body matches a regex pattern.
///
/// # Panics
///
/// Panics if no message was sent, the pattern is invalid, or the plain text
/// body doesn't match.
pub fn assert_plain_body_matches(transport: &RecordingTransport, pattern: &str) {
    let (last, body) = last_plain_body(transport);
    let re = Regex::new(pattern).expect("Invalid regex pattern");

    assert!(
        re.is_match(&body),
        "Expected plain text body to match pattern '{}', but it didn't.\n\nLast message:\n{}\n\nPlain text body (first 500 chars):\n{}",
        pattern,
        format_summary(&[last]),
        excerpt(&body)
    );
}

/// Assert the last message has an attachment with the given file name.
///
/// # Panics
///
/// Panics if no message was sent or no attachment with that name exists.
pub fn assert_message_has_attachment(transport: &RecordingTransport, file_name: &str) {
    let last = last_message(transport);
    let names: Vec<&str> = last
        .attachments()
        .into_iter()
        .filter_map(|p| p.file_name.as_deref())
        .collect();

    assert!(
        names.contains(&file_name),
        "Expected message to have attachment '{}'.\n\nLast message:\n{}\n\nAttachments: [{}]",
        file_name,
        format_summary(&[last.clone()]),
        names.join(", ")
    );
}

// ============================================================================
// Raw Email Assertions
// ============================================================================

/// Assert the last raw email went to a specific address.
///
/// # Panics
///
/// Panics if no raw email was sent or the recipient doesn't match.
pub fn assert_raw_email_to(transport: &RecordingTransport, address: &str) {
    let raw = transport
        .last_raw_email()
        .expect("Expected at least one raw email to be sent, but none were sent");

    assert!(
        raw.recipient.eq_ignore_ascii_case(address),
        "Expected last raw email to '{}', but it went to '{}' (subject \"{}\")",
        address,
        raw.recipient,
        raw.subject
    );
}
