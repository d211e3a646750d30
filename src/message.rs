//! Transport-facing messages produced by the mailer.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::role::Role;

/// Content type of the plain text body part.
pub const TEXT_PLAIN: &str = "text/plain";

/// Content type of the HTML body part.
pub const TEXT_HTML: &str = "text/html";

/// One part of a [`SentMessage`]: a body or an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyPart {
    /// Raw content
    pub content: Vec<u8>,
    /// MIME content type
    pub content_type: String,
    /// File name, set for attachments
    pub file_name: Option<String>,
    /// Character set, set for the plain text part
    pub charset: Option<String>,
}

impl BodyPart {
    /// A plain text body part in the given character set.
    pub fn plain(content: impl Into<String>, charset: impl Into<String>) -> Self {
        Self {
            content: content.into().into_bytes(),
            content_type: TEXT_PLAIN.to_string(),
            file_name: None,
            charset: Some(charset.into()),
        }
    }

    /// An HTML body part.
    pub fn html(content: impl Into<String>) -> Self {
        Self {
            content: content.into().into_bytes(),
            content_type: TEXT_HTML.to_string(),
            file_name: None,
            charset: None,
        }
    }

    /// An attachment part.
    pub fn attachment(
        content: Vec<u8>,
        content_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            content,
            content_type: content_type.into(),
            file_name: Some(file_name.into()),
            charset: None,
        }
    }

    /// The content as text, if it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    /// Check if this part carries a file name (an attachment).
    pub fn is_attachment(&self) -> bool {
        self.file_name.is_some()
    }
}

/// A message for exactly one recipient.
///
/// The mailer produces one of these per recipient of an
/// [`Email`](crate::Email); they are never merged into a multi-recipient
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentMessage {
    /// Sender
    pub from: Role,
    /// The single recipient
    pub to: Role,
    /// Subject line
    pub subject: String,
    /// Body parts: plain text, then HTML, then attachments
    pub body_parts: Vec<BodyPart>,
    /// Return-Path, copied verbatim from the email
    pub return_path: Option<String>,
}

impl SentMessage {
    /// The sender as a one-entry `address => name` map.
    pub fn from_map(&self) -> BTreeMap<String, String> {
        single_entry(&self.from)
    }

    /// The recipient as a one-entry `address => name` map.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        single_entry(&self.to)
    }

    /// Content of the first body part as text.
    pub fn body(&self) -> Option<&str> {
        self.body_parts.first().and_then(BodyPart::text)
    }

    /// Content type of the first body part.
    pub fn content_type(&self) -> Option<&str> {
        self.body_parts.first().map(|p| p.content_type.as_str())
    }

    /// Character set of the plain text part, if there is one.
    pub fn charset(&self) -> Option<&str> {
        self.plain_part().and_then(|p| p.charset.as_deref())
    }

    /// The plain text part, if any.
    pub fn plain_part(&self) -> Option<&BodyPart> {
        self.body_parts
            .iter()
            .find(|p| !p.is_attachment() && p.content_type == TEXT_PLAIN)
    }

    /// The HTML part, if any.
    pub fn html_part(&self) -> Option<&BodyPart> {
        self.body_parts
            .iter()
            .find(|p| !p.is_attachment() && p.content_type == TEXT_HTML)
    }

    /// Attachment parts, in the order they were added.
    pub fn attachments(&self) -> Vec<&BodyPart> {
        self.body_parts.iter().filter(|p| p.is_attachment()).collect()
    }
}

fn single_entry(role: &Role) -> BTreeMap<String, String> {
    BTreeMap::from([(role.address().to_string(), role.name().to_string())])
}

/// A mail handed over through the low-level raw path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawEmail {
    /// Recipient address
    pub recipient: String,
    /// Subject line
    pub subject: String,
    /// Body, already formatted if formatting was enabled
    pub body: String,
    /// Additional headers, pre-rendered
    pub headers: String,
}

impl RawEmail {
    /// Create a raw email.
    pub fn new(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        headers: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
            headers: headers.into(),
        }
    }
}
