//! Allowlist enforcement over a parsed HTML tree
//!
//! This module walks the DOM built by [`crate::parser`] and removes everything
//! the [`Allowlist`] does not name.
//!
//! # Threat Model
//!
//! The input is **untrusted HTML**: markdown authors can embed raw tags, and
//! the markdown renderer passes them through. That HTML may contain:
//! - Script-carrying elements (`<script>`, `<style>`, `<foreignObject>`,
//!   `<iframe>`, `<object>`)
//! - Event handlers (onclick, onload, ...)
//! - Inline styles
//! - Markup the page was never meant to host (forms, inputs, meta tags)
//!
//! # Rules
//!
//! 1. **Elements**: an element whose tag is not allowlisted is removed
//!    together with its whole subtree. Nothing is unwrapped, so no text from
//!    inside a `<script>` or `<style>` can leak into the output.
//! 2. **Text**: bare text nodes survive whenever their container survives
//!    (the `#text` pseudo-tag).
//! 3. **Other nodes**: comments, doctypes and processing instructions are
//!    dropped.
//! 4. **Attributes**: on a surviving element, every attribute whose
//!    qualified name is not allowlisted is dropped.
//! 5. **Depth**: elements nested deeper than the configured maximum are
//!    removed with their subtree. [`crate::nesting`] applies the same limit
//!    to the markup before the tree is built, and the walk here uses an
//!    explicit stack, so deep input costs neither quadratic time nor call
//!    stack.
//!
//! Attribute values are never inspected. A `javascript:` URL in `href` is
//! kept; the allowlist only guarantees which tags and attribute names can
//! appear.

use html5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData};
use std::borrow::Cow;
use tracing::{trace, warn};

use crate::allowlist::Allowlist;

/// Maximum element nesting depth kept in the output
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Highest depth limit a filter accepts; larger requests are clamped
///
/// Tree construction cost grows with the depth it has to support, so the
/// limit also bounds the work done per input byte.
pub const MAX_DEPTH_CEILING: usize = 1024;

/// Action to take for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeAction {
    /// Keep the element (its attributes are still filtered)
    Allow,
    /// Remove the element and all its children
    Remove,
}

/// What a sanitization pass removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Elements removed because their tag is not allowlisted
    pub removed_elements: usize,
    /// Attributes removed from surviving elements
    pub removed_attributes: usize,
    /// Comments, doctypes and processing instructions
    pub removed_nodes: usize,
    /// Text nodes removed because `#text` is not allowlisted
    pub removed_text: usize,
    /// Subtrees cut off at the depth limit
    pub depth_limited: usize,
}

impl SanitizeReport {
    /// True when the input already satisfied the allowlist
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Applies an allowlist to a DOM tree in place
pub struct TreeFilter<'a> {
    allowlist: &'a Allowlist,
    max_depth: usize,
}

impl<'a> TreeFilter<'a> {
    /// Create a filter with the default depth limit
    pub fn new(allowlist: &'a Allowlist) -> Self {
        Self {
            allowlist,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a filter with a custom depth limit, clamped to [`MAX_DEPTH_CEILING`]
    pub fn with_max_depth(allowlist: &'a Allowlist, max_depth: usize) -> Self {
        Self {
            allowlist,
            max_depth: max_depth.min(MAX_DEPTH_CEILING),
        }
    }

    /// The depth limit in effect
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decide what to do with an element by tag name
    ///
    /// # Examples
    ///
    /// ```
    /// use markdown_sanitizer::allowlist::Allowlist;
    /// use markdown_sanitizer::security::{SanitizeAction, TreeFilter};
    ///
    /// let filter = TreeFilter::new(Allowlist::standard());
    /// assert_eq!(filter.check_element("script"), SanitizeAction::Remove);
    /// assert_eq!(filter.check_element("circle"), SanitizeAction::Allow);
    /// ```
    pub fn check_element(&self, tag_name: &str) -> SanitizeAction {
        if self.allowlist.tags().contains(tag_name) {
            SanitizeAction::Allow
        } else {
            SanitizeAction::Remove
        }
    }

    /// Check an attribute against the global attribute allowlist
    pub fn is_allowed_attribute(&self, attr: &Attribute) -> bool {
        self.allowlist
            .attributes()
            .contains(&qualified_attribute_name(attr))
    }

    /// Validate nesting depth
    ///
    /// # Examples
    ///
    /// ```
    /// use markdown_sanitizer::allowlist::Allowlist;
    /// use markdown_sanitizer::security::TreeFilter;
    ///
    /// let filter = TreeFilter::with_max_depth(Allowlist::standard(), 100);
    /// assert!(filter.validate_depth(100).is_ok());
    /// assert!(filter.validate_depth(101).is_err());
    /// ```
    pub fn validate_depth(&self, depth: usize) -> Result<(), String> {
        if depth > self.max_depth {
            Err(format!(
                "HTML nesting depth {} exceeds maximum allowed depth {}",
                depth, self.max_depth
            ))
        } else {
            Ok(())
        }
    }

    /// Filter every descendant of `root`, leaving `root` itself untouched
    pub fn filter_children(&self, root: &Handle) -> SanitizeReport {
        let mut report = SanitizeReport::default();
        let mut pending = vec![(root.clone(), 1)];

        while let Some((parent, depth)) = pending.pop() {
            let children = parent.children.take();
            let mut kept = Vec::with_capacity(children.len());

            for child in children {
                if !self.keep_node(&child, depth, &mut report) {
                    continue;
                }
                if matches!(child.data, NodeData::Element { .. }) {
                    pending.push((child.clone(), depth + 1));
                }
                kept.push(child);
            }

            *parent.children.borrow_mut() = kept;
        }

        report
    }

    /// Decide whether a node at `depth` stays, filtering its attributes if so
    fn keep_node(&self, node: &Handle, depth: usize, report: &mut SanitizeReport) -> bool {
        match node.data {
            NodeData::Text { .. } => {
                let allowed = self.allowlist.tags().allows_text();
                if !allowed {
                    report.removed_text += 1;
                }
                allowed
            }
            NodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                let tag_name = name.local.as_ref();
                if self.check_element(tag_name) == SanitizeAction::Remove {
                    trace!(tag = tag_name, "removing disallowed element");
                    report.removed_elements += 1;
                    false
                } else if let Err(reason) = self.validate_depth(depth) {
                    warn!(tag = tag_name, depth, "{}", reason);
                    report.depth_limited += 1;
                    false
                } else {
                    let mut attrs = attrs.borrow_mut();
                    let before = attrs.len();
                    attrs.retain(|attr| self.is_allowed_attribute(attr));
                    report.removed_attributes += before - attrs.len();
                    true
                }
            }
            NodeData::Document
            | NodeData::Doctype { .. }
            | NodeData::Comment { .. }
            | NodeData::ProcessingInstruction { .. } => {
                report.removed_nodes += 1;
                false
            }
        }
    }
}

/// Attribute name as it appears in markup, including any namespace prefix
///
/// `xlink:href` is reported as `xlink:href`, not `href`, so namespaced
/// attributes only pass when the prefixed name is allowlisted.
pub fn qualified_attribute_name(attr: &Attribute) -> Cow<'_, str> {
    match attr.name.prefix {
        Some(ref prefix) => Cow::Owned(format!("{}:{}", prefix, attr.name.local)),
        None => Cow::Borrowed(attr.name.local.as_ref()),
    }
}
