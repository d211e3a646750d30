//! Email struct with builder pattern.

use serde::Serialize;

use crate::attachment::Attachment;
use crate::error::MailError;
use crate::role::{Role, ToRole};

/// An email message, before it is split into per-recipient messages.
///
/// Building is permissive: nothing is checked until the email is handed to
/// [`Mailer::send`](crate::Mailer::send), so an email can be assembled step
/// by step.
///
/// ```
/// use mailroom::{Email, Role};
///
/// let email = Email::new()
///     .sender(Role::new("Shop", "shop@example.com").unwrap())
///     .recipient(Role::new("John Doe", "john@example.com").unwrap())
///     .subject("Your order")
///     .plain_body("Thanks for ordering.")
///     .html_body("<p>Thanks for ordering.</p>");
///
/// assert_eq!(email.recipients.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Email {
    /// Sender
    pub sender: Option<Role>,
    /// Recipients, in delivery order (duplicates are kept)
    pub recipients: Vec<Role>,
    /// Subject line
    pub subject: String,
    /// Plain text body
    pub plain_body: Option<String>,
    /// HTML body
    pub html_body: Option<String>,
    /// Attachments, in insertion order
    pub attachments: Vec<Attachment>,
    /// Return-Path (bounce address)
    pub return_path: Option<String>,
}

impl Email {
    /// Create a new empty email.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender.
    pub fn sender(mut self, role: Role) -> Self {
        self.sender = Some(role);
        self
    }

    /// Set the sender from anything that implements `ToRole`.
    pub fn try_sender(self, role: impl ToRole) -> Result<Self, MailError> {
        Ok(self.sender(role.to_role()?))
    }

    /// Add a recipient.
    ///
    /// Can be called multiple times; each recipient gets its own message.
    pub fn recipient(mut self, role: Role) -> Self {
        self.recipients.push(role);
        self
    }

    /// Add a recipient from anything that implements `ToRole`.
    pub fn try_recipient(self, role: impl ToRole) -> Result<Self, MailError> {
        Ok(self.recipient(role.to_role()?))
    }

    /// Replace all recipients.
    pub fn put_recipients(mut self, roles: Vec<Role>) -> Self {
        self.recipients = roles;
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the plain text body.
    pub fn plain_body(mut self, body: impl Into<String>) -> Self {
        self.plain_body = Some(body.into());
        self
    }

    /// Set the HTML body.
    pub fn html_body(mut self, body: impl Into<String>) -> Self {
        self.html_body = Some(body.into());
        self
    }

    /// Add an attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Set the Return-Path.
    pub fn return_path(mut self, address: impl Into<String>) -> Self {
        self.return_path = Some(address.into());
        self
    }

    /// Check if a sender is set.
    pub fn has_sender(&self) -> bool {
        self.sender.is_some()
    }

    /// Check if a non-empty plain text body is set.
    pub fn has_plain_body(&self) -> bool {
        self.plain_body.as_deref().is_some_and(|b| !b.is_empty())
    }

    /// Check if a non-empty HTML body is set.
    pub fn has_html_body(&self) -> bool {
        self.html_body.as_deref().is_some_and(|b| !b.is_empty())
    }

    /// Check if the email has any attachments.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str, address: &str) -> Role {
        Role::new(name, address).unwrap()
    }

    #[test]
    fn test_builder() {
        let email = Email::new()
            .sender(role("", "sender@example.com"))
            .recipient(role("John", "john@example.com"))
            .subject("Test")
            .plain_body("Hello");

        assert_eq!(email.sender.unwrap().address(), "sender@example.com");
        assert_eq!(email.recipients.len(), 1);
        assert_eq!(email.recipients[0].name(), "John");
        assert_eq!(email.subject, "Test");
        assert_eq!(email.plain_body, Some("Hello".to_string()));
        assert!(email.return_path.is_none());
    }

    #[test]
    fn test_construction_is_permissive() {
        let email = Email::new();
        assert!(!email.has_sender());
        assert!(email.recipients.is_empty());
        assert!(email.subject.is_empty());
        assert!(!email.has_plain_body());
        assert!(!email.has_html_body());
    }

    #[test]
    fn test_duplicate_recipients_are_kept() {
        let email = Email::new()
            .recipient(role("", "a@example.com"))
            .recipient(role("", "a@example.com"));
        assert_eq!(email.recipients.len(), 2);
    }

    #[test]
    fn test_empty_bodies_do_not_count() {
        let email = Email::new().plain_body("").html_body("");
        assert!(!email.has_plain_body());
        assert!(!email.has_html_body());
    }

    #[test]
    fn test_try_builders() {
        let email = Email::new()
            .try_sender(("Shop", "shop@example.com"))
            .unwrap()
            .try_recipient("john@example.com")
            .unwrap();
        assert_eq!(email.sender.unwrap().name(), "Shop");
        assert_eq!(email.recipients[0].address(), "john@example.com");

        assert!(Email::new().try_recipient("").is_err());
    }

    #[test]
    fn test_attachments_keep_order() {
        let email = Email::new()
            .attachment(Attachment::from_bytes(b"1".to_vec(), "text/plain").file_name("1.txt"))
            .attachment(Attachment::from_bytes(b"2".to_vec(), "text/plain").file_name("2.txt"));

        assert!(email.has_attachments());
        assert_eq!(email.attachments[0].resolve_file_name(), "1.txt");
        assert_eq!(email.attachments[1].resolve_file_name(), "2.txt");
    }
}
