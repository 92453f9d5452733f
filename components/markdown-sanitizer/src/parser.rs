//! HTML5 fragment parsing using html5ever
//!
//! Untrusted HTML is parsed the way a browser would parse it when assigned to
//! the `innerHTML` of a `<body>` element. Using the WHATWG algorithm means the
//! sanitizer sees the same tree the browser will eventually build, including
//! for malformed markup.
//!
//! # Features
//!
//! - **Never fails**: every string produces a tree, however broken the markup
//! - **Foreign content**: `<svg>` subtrees land in the SVG namespace with
//!   their camelCase tag and attribute names restored (`clipPath`, `viewBox`)
//! - **Scripting enabled**: parsing follows a browser that runs scripts, so
//!   `<noscript>` content is a single raw text node rather than markup
//!
//! # Tree shape
//!
//! html5ever builds fragments under a synthetic `<html>` element that is the
//! only child of the document node. [`fragment_root`] returns that element;
//! its children are the parsed fragment.

use html5ever::tendril::TendrilSink;
use html5ever::{QualName, local_name, ns, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML string as a `<body>` fragment
///
/// # Examples
///
/// ```rust
/// use markdown_sanitizer::parser::{fragment_root, parse_html_fragment};
///
/// let dom = parse_html_fragment("<p>Hello<p>World");
/// let root = fragment_root(&dom).expect("fragment root");
/// assert_eq!(root.children.borrow().len(), 2);
/// ```
pub fn parse_html_fragment(html: &str) -> RcDom {
    let context = QualName::new(None, ns!(html), local_name!("body"));
    parse_fragment(RcDom::default(), Default::default(), context, Vec::new(), false).one(html)
}

/// The synthetic element holding the parsed fragment
pub fn fragment_root(dom: &RcDom) -> Option<Handle> {
    dom.document
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
}
