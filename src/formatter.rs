//! Line-ending normalization for plain text bodies.

use regex::Regex;
use std::sync::OnceLock;

fn line_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r\n?").expect("static regex"))
}

fn blank_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("static regex"))
}

/// Normalize the line endings of a plain text body.
///
/// CR-LF pairs and lone CRs become LF, then any run of three or more LFs is
/// capped at two, so a single blank line survives but longer gaps don't.
///
/// ```
/// use mailroom::normalize;
///
/// assert_eq!(normalize("a\r\nb"), "a\nb");
/// assert_eq!(normalize("a\r\r\r\r\rb"), "a\n\nb");
/// assert_eq!(normalize("a\n\nb"), "a\n\nb");
/// ```
pub fn normalize(text: &str) -> String {
    let unified = line_break().replace_all(text, "\n");
    blank_run().replace_all(&unified, "\n\n").into_owned()
}
