//! Email attachments backed by a file or by in-memory bytes.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::MailError;

/// Where the content of an attachment comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttachmentSource {
    /// Read from this path when the email is sent.
    File(PathBuf),
    /// Bytes held in memory.
    Inline(Vec<u8>),
}

/// An email attachment.
///
/// File-backed attachments defer reading until the mail is assembled, so the
/// file is read at send time, not at construction time. No MIME sniffing is
/// done: the content type is whatever the caller sets.
///
/// # Examples
///
/// ```
/// use mailroom::Attachment;
///
/// // From bytes
/// let report = Attachment::from_bytes(b"a,b,c".to_vec(), "text/csv")
///     .file_name("report.csv");
/// assert_eq!(report.resolve_file_name(), "report.csv");
///
/// // From a path (read lazily)
/// let terms = Attachment::from_path("/srv/files/terms.pdf", "application/pdf");
/// assert_eq!(terms.resolve_file_name(), "terms.pdf");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    /// Content source
    pub source: AttachmentSource,
    /// MIME content type (e.g., "application/pdf", "image/png")
    pub content_type: String,
    /// Explicit file name, overriding the base name of a file source
    pub file_name: Option<String>,
}

impl Attachment {
    /// Create a file-backed attachment. The file is not touched until sending.
    pub fn from_path(path: impl AsRef<Path>, content_type: impl Into<String>) -> Self {
        Self {
            source: AttachmentSource::File(path.as_ref().to_path_buf()),
            content_type: content_type.into(),
            file_name: None,
        }
    }

    /// Create an attachment from raw bytes.
    pub fn from_bytes(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            source: AttachmentSource::Inline(data),
            content_type: content_type.into(),
            file_name: None,
        }
    }

    /// Set the file name shown to the recipient.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Set the content type explicitly.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the file name shown to the recipient.
    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.file_name = Some(name.into());
    }

    /// Switch to a file source, dropping any inline content.
    pub fn set_file_source(&mut self, path: impl AsRef<Path>) {
        self.source = AttachmentSource::File(path.as_ref().to_path_buf());
    }

    /// Switch to inline content, dropping any file source.
    pub fn set_inline_content(&mut self, data: Vec<u8>) {
        self.source = AttachmentSource::Inline(data);
    }

    /// Get the attachment content, reading the file for file sources.
    ///
    /// # Errors
    ///
    /// - `AttachmentFileNotFound` - File path doesn't exist
    /// - `AttachmentReadError` - Failed to read file
    pub fn resolve_bytes(&self) -> Result<Vec<u8>, MailError> {
        match &self.source {
            AttachmentSource::File(path) => std::fs::read(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    MailError::AttachmentFileNotFound(path.display().to_string())
                } else {
                    MailError::AttachmentReadError(format!("{}: {}", path.display(), e))
                }
            }),
            AttachmentSource::Inline(data) => Ok(data.clone()),
        }
    }

    /// The explicit file name, else the base name of the file source, else
    /// an empty string.
    pub fn resolve_file_name(&self) -> String {
        if let Some(ref name) = self.file_name {
            return name.clone();
        }

        match &self.source {
            AttachmentSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            AttachmentSource::Inline(_) => String::new(),
        }
    }

    /// Check if the content is read from a file at send time.
    pub fn is_file_backed(&self) -> bool {
        matches!(self.source, AttachmentSource::File(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let attachment = Attachment::from_bytes(b"Hello".to_vec(), "text/plain");
        assert_eq!(attachment.content_type, "text/plain");
        assert_eq!(attachment.resolve_bytes().unwrap(), b"Hello");
        assert!(!attachment.is_file_backed());
    }

    #[test]
    fn test_inline_without_name_has_empty_file_name() {
        let attachment = Attachment::from_bytes(vec![1, 2, 3], "application/octet-stream");
        assert_eq!(attachment.resolve_file_name(), "");
    }

    #[test]
    fn test_file_name_from_path() {
        let attachment = Attachment::from_path("/tmp/some/dir/test.txt", "text/plain");
        assert_eq!(attachment.resolve_file_name(), "test.txt");
        assert!(attachment.is_file_backed());
    }

    #[test]
    fn test_explicit_file_name_wins() {
        let attachment =
            Attachment::from_path("/tmp/some/dir/test.txt", "text/plain").file_name("notes.txt");
        assert_eq!(attachment.resolve_file_name(), "notes.txt");
    }

    #[test]
    fn test_sources_are_exclusive() {
        let mut attachment = Attachment::from_bytes(b"inline".to_vec(), "text/plain");
        attachment.set_file_source("/tmp/report.txt");
        assert_eq!(
            attachment.source,
            AttachmentSource::File(PathBuf::from("/tmp/report.txt"))
        );

        attachment.set_inline_content(b"again".to_vec());
        assert_eq!(attachment.source, AttachmentSource::Inline(b"again".to_vec()));
        assert_eq!(attachment.resolve_file_name(), "");
    }

    #[test]
    fn test_missing_file() {
        let attachment =
            Attachment::from_path("/nonexistent/mailroom/missing.txt", "text/plain");
        let err = attachment.resolve_bytes().unwrap_err();
        assert!(matches!(err, MailError::AttachmentFileNotFound(_)));
        assert!(err.is_io());
    }
}
