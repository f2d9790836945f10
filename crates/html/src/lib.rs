//! Markup model for the widget: tokenizer, tree builder, traversal, serializer and sanitizer.
//!
//! The surface of an editable widget is described by a markup string. This crate turns that
//! string into a [`Node`] tree (for caret translation and text extraction), scans it for text
//! content (for pattern substitution) and normalizes it before display.

pub mod scan;
pub mod traverse;

mod dom_builder;
mod entities;
mod sanitize;
mod serialize;
mod tokenizer;
mod types;

pub use crate::dom_builder::build_dom;
pub use crate::entities::{escape_attribute, escape_text};
pub use crate::sanitize::sanitize;
pub use crate::serialize::{serialize, serialize_into};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Attribute, Id, Node, NodeId, Token, TokenStream};

/// Parse markup into a tree with ids assigned in document order.
pub fn parse(markup: &str) -> Node {
    let mut root = build_dom(&tokenize(markup));
    traverse::assign_node_ids(&mut root);
    root
}
