//! HTML string types on either side of the sanitization boundary

use std::fmt;

/// HTML that has not been filtered
///
/// Produced by markdown rendering and consumed by the sanitizer. Anything may
/// be inside: raw tags from the markdown source pass straight through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UntrustedHtml(String);

impl UntrustedHtml {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for UntrustedHtml {
    fn from(html: String) -> Self {
        Self(html)
    }
}

impl From<&str> for UntrustedHtml {
    fn from(html: &str) -> Self {
        Self(html.to_string())
    }
}

/// HTML containing only allowlisted tags and attributes
///
/// Only the sanitizer constructs values of this type, so holding one means
/// the allowlist has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// True when the output has no visible markup or text
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for SanitizedHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SanitizedHtml> for String {
    fn from(html: SanitizedHtml) -> Self {
        html.0
    }
}

impl fmt::Display for SanitizedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
