//! Markdown Sanitizer - untrusted markdown to embeddable HTML
//!
//! This library turns author-supplied markdown (dataset descriptions and
//! similar content) into HTML that only contains allowlisted tags and
//! attributes, so it can be embedded into a page without further escaping.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `render`: Markdown to untrusted HTML using pulldown-cmark
//! - `nesting`: Depth cap applied to untrusted HTML before tree construction
//! - `parser`: HTML5 fragment parsing using html5ever
//! - `security`: Allowlist enforcement over the parsed tree
//! - `serialize`: Filtered tree back to HTML text
//! - `allowlist`: The tag and attribute allowlists
//! - `sanitizer`: The pipeline tying the stages together
//! - `html`: String types on each side of the boundary
//! - `error`: Internal error type
//!
//! # Guarantees
//!
//! Every tag in the output is in the tag allowlist and every attribute is in
//! the attribute allowlist. Attribute values are not inspected, so this is
//! not a complete XSS defence on its own: a `javascript:` link survives.
//!
//! # Examples
//!
//! ```
//! let html = markdown_sanitizer::sanitize("# Flu\n\n<svg><circle r=\"1\" onload=\"x()\"/></svg>");
//! assert!(html.as_str().contains("<h1 id=\"flu\">Flu</h1>"));
//! assert!(html.as_str().contains("<circle r=\"1\">"));
//! assert!(!html.as_str().contains("onload"));
//! ```

// Module declarations
pub mod allowlist;
pub mod error;
pub mod html;
pub mod nesting;
pub mod parser;
pub mod render;
pub mod sanitizer;
pub mod security;
pub mod serialize;

use std::sync::OnceLock;

// Re-export main types for convenience
pub use allowlist::{Allowlist, AllowlistBuilder, AttributeAllowlist, TagAllowlist};
pub use error::SanitizeError;
pub use html::{SanitizedHtml, UntrustedHtml};
pub use render::RenderOptions;
pub use sanitizer::{MarkdownSanitizer, SanitizeOptions};
pub use security::SanitizeReport;

fn default_sanitizer() -> &'static MarkdownSanitizer {
    static DEFAULT: OnceLock<MarkdownSanitizer> = OnceLock::new();
    DEFAULT.get_or_init(MarkdownSanitizer::new)
}

/// Render markdown and sanitize it with the default configuration
pub fn sanitize(markdown: &str) -> SanitizedHtml {
    default_sanitizer().sanitize(markdown)
}

/// Sanitize an HTML string with the default allowlist, without markdown rendering
pub fn sanitize_html(html: &str) -> SanitizedHtml {
    default_sanitizer().sanitize_html(UntrustedHtml::from(html))
}
