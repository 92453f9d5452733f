//! Error types for the sanitization pipeline
//!
//! None of these reach callers of [`crate::sanitize`]: the public entry points
//! fail closed and return empty output instead.

use std::fmt;

/// Errors that can occur while producing sanitized HTML
#[derive(Debug)]
pub enum SanitizeError {
    /// Writing the filtered tree back to HTML failed
    SerializeError(String),
    /// Serialized output was not valid UTF-8
    EncodingError(String),
    /// Parsed fragment had no root element to serialize from
    MissingRoot,
}

impl SanitizeError {
    /// Get numeric error code
    pub fn code(&self) -> u32 {
        match self {
            SanitizeError::SerializeError(_) => 1,
            SanitizeError::EncodingError(_) => 2,
            SanitizeError::MissingRoot => 3,
        }
    }
}

impl fmt::Display for SanitizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizeError::SerializeError(msg) => write!(f, "Serialize error: {}", msg),
            SanitizeError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            SanitizeError::MissingRoot => write!(f, "Parsed fragment has no root element"),
        }
    }
}

impl std::error::Error for SanitizeError {}

impl From<std::io::Error> for SanitizeError {
    fn from(err: std::io::Error) -> Self {
        SanitizeError::SerializeError(err.to_string())
    }
}
