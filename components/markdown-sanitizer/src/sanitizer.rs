//! Markdown sanitizer - the two-stage pipeline
//!
//! ```text
//! markdown ──render──▶ UntrustedHtml ──parse / filter / serialize──▶ SanitizedHtml
//! ```
//!
//! Stage 1 ([`crate::render`]) knows nothing about safety. Stage 2 parses its
//! output as an HTML5 fragment, applies the [`Allowlist`] and serializes the
//! result. Stage 2 is also exposed directly through
//! [`MarkdownSanitizer::sanitize_html`].
//!
//! # Failure behaviour
//!
//! Neither stage rejects input. The only fallible step is serialization into
//! an in-memory buffer; should it ever fail, the result is an empty
//! [`SanitizedHtml`] rather than partially filtered markup.

use tracing::{debug, warn};

use crate::allowlist::Allowlist;
use crate::error::SanitizeError;
use crate::html::{SanitizedHtml, UntrustedHtml};
use crate::nesting::cap_nesting;
use crate::parser::{fragment_root, parse_html_fragment};
use crate::render::{RenderOptions, render_markdown};
use crate::security::{DEFAULT_MAX_DEPTH, SanitizeReport, TreeFilter};
use crate::serialize::serialize_children;

/// Sanitization options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Markdown rendering options for stage 1
    pub render: RenderOptions,
    /// Deepest element nesting kept in the output, at most
    /// [`MAX_DEPTH_CEILING`](crate::security::MAX_DEPTH_CEILING)
    pub max_depth: usize,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Converts markdown into HTML restricted to an allowlist
///
/// The sanitizer holds no mutable state; one instance can be shared across
/// threads.
///
/// # Examples
///
/// ```
/// use markdown_sanitizer::MarkdownSanitizer;
///
/// let sanitizer = MarkdownSanitizer::new();
/// let html = sanitizer.sanitize("Hello **world**<script>alert(1)</script>");
/// assert!(html.as_str().contains("<strong>world</strong>"));
/// assert!(!html.as_str().contains("script"));
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownSanitizer {
    options: SanitizeOptions,
    allowlist: Allowlist,
}

impl MarkdownSanitizer {
    /// Create a sanitizer with default options and the standard allowlist
    pub fn new() -> Self {
        Self::with_options(SanitizeOptions::default())
    }

    pub fn with_options(options: SanitizeOptions) -> Self {
        Self {
            options,
            allowlist: Allowlist::standard().clone(),
        }
    }

    /// Replace the allowlist
    pub fn with_allowlist(mut self, allowlist: Allowlist) -> Self {
        self.allowlist = allowlist;
        self
    }

    pub fn options(&self) -> &SanitizeOptions {
        &self.options
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    /// Render markdown and sanitize the result
    pub fn sanitize(&self, markdown: &str) -> SanitizedHtml {
        self.sanitize_with_report(markdown).0
    }

    /// Like [`sanitize`](Self::sanitize), also returning what was removed
    pub fn sanitize_with_report(&self, markdown: &str) -> (SanitizedHtml, SanitizeReport) {
        let untrusted = render_markdown(markdown, &self.options.render);
        self.sanitize_html_with_report(untrusted)
    }

    /// Sanitize HTML directly, skipping markdown rendering
    pub fn sanitize_html(&self, html: UntrustedHtml) -> SanitizedHtml {
        self.sanitize_html_with_report(html).0
    }

    pub fn sanitize_html_with_report(&self, html: UntrustedHtml) -> (SanitizedHtml, SanitizeReport) {
        match self.try_sanitize_html(&html) {
            Ok((output, report)) => {
                debug!(
                    input_len = html.as_str().len(),
                    output_len = output.len(),
                    removed_elements = report.removed_elements,
                    removed_attributes = report.removed_attributes,
                    removed_nodes = report.removed_nodes,
                    removed_text = report.removed_text,
                    depth_limited = report.depth_limited,
                    "sanitized html"
                );
                (SanitizedHtml::new(output), report)
            }
            Err(err) => {
                warn!(code = err.code(), error = %err, "sanitization failed, returning empty output");
                (SanitizedHtml::default(), SanitizeReport::default())
            }
        }
    }

    fn try_sanitize_html(
        &self,
        html: &UntrustedHtml,
    ) -> Result<(String, SanitizeReport), SanitizeError> {
        let filter = TreeFilter::with_max_depth(&self.allowlist, self.options.max_depth);
        let capped = cap_nesting(html.as_str(), filter.max_depth());

        let dom = parse_html_fragment(&capped.html);
        let root = fragment_root(&dom).ok_or(SanitizeError::MissingRoot)?;

        let mut report = filter.filter_children(&root);
        report.depth_limited += capped.cut_subtrees;

        let output = serialize_children(&root)?;
        Ok((output, report))
    }
}

impl Default for MarkdownSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
