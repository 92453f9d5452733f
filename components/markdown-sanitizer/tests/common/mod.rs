//! Shared helpers for inspecting sanitized output

#![allow(dead_code)]

use markdown_sanitizer::parser::{fragment_root, parse_html_fragment};
use markdown_sanitizer::security::qualified_attribute_name;
use markup5ever_rcdom::{Handle, NodeData};

/// An element found in sanitized output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundElement {
    pub tag: String,
    pub attributes: Vec<String>,
}

/// Re-parse `html` and list every element with its attribute names
pub fn elements(html: &str) -> Vec<FoundElement> {
    let dom = parse_html_fragment(html);
    let mut found = Vec::new();
    if let Some(root) = fragment_root(&dom) {
        collect(&root, &mut found);
    }
    found
}

pub fn tags(html: &str) -> Vec<String> {
    elements(html).into_iter().map(|e| e.tag).collect()
}

fn collect(node: &Handle, found: &mut Vec<FoundElement>) {
    for child in node.children.borrow().iter() {
        if let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = child.data
        {
            found.push(FoundElement {
                tag: name.local.to_string(),
                attributes: attrs
                    .borrow()
                    .iter()
                    .map(|attr| qualified_attribute_name(attr).into_owned())
                    .collect(),
            });
        }
        collect(child, found);
    }
}
