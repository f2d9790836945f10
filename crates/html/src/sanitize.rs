//! Normalization of composed widget markup before it is committed to a surface.
//!
//! This is not a general-purpose sanitizer. It neutralizes the executable vectors that can sneak
//! into composed markup (script-bearing elements, inline event handlers, `javascript:` URLs) and
//! normalizes structure (stray `<`, unmatched end tags, unclosed elements) while leaving
//! generated styling spans intact.

use crate::serialize::serialize_into;
use crate::types::{Attribute, Node};
use crate::{build_dom, tokenize};

const BLOCKED_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "link", "meta", "base", "form", "frame",
    "frameset", "template",
];

const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "xlink:href"];

pub fn sanitize(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    let mut root = build_dom(&tokenize(markup));
    let removed = scrub(&mut root);
    if removed > 0 {
        log::debug!(target: "html.sanitize", "removed {removed} unsafe nodes or attributes");
    }
    let mut out = String::with_capacity(markup.len());
    serialize_into(&root, &mut out);
    out
}

fn is_blocked_element(name: &str) -> bool {
    BLOCKED_ELEMENTS.iter().any(|b| name.eq_ignore_ascii_case(b))
}

fn is_unsafe_attribute((key, value): &Attribute) -> bool {
    if key.len() > 2 && key.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("on")) {
        return true;
    }
    if !URL_ATTRIBUTES.iter().any(|a| key.eq_ignore_ascii_case(a)) {
        return false;
    }
    let Some(value) = value else {
        return false;
    };
    // Browsers ignore ASCII whitespace and control characters inside the scheme.
    let scheme: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    scheme.starts_with("javascript:") || scheme.starts_with("vbscript:")
}

/// Remove unsafe nodes and attributes in place. Returns how many were removed.
fn scrub(node: &mut Node) -> usize {
    let mut removed = 0;
    if let Node::Element { attributes, .. } = node {
        let before = attributes.len();
        attributes.retain(|attr| !is_unsafe_attribute(attr));
        removed += before - attributes.len();
    }
    if let Some(children) = node.children_mut() {
        let before = children.len();
        children.retain(|c| match c {
            Node::Element { name, .. } => !is_blocked_element(name),
            Node::Comment { .. } => false,
            _ => true,
        });
        removed += before - children.len();
        for c in children {
            removed += scrub(c);
        }
    }
    removed
}
