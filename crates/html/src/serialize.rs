use crate::entities::{escape_attribute, escape_text};
use crate::tokenizer::is_void_element;
use crate::types::Node;

/// Serialize a tree back to markup. Comments are emitted verbatim, text and attribute values
/// are escaped, void elements get no end tag.
pub fn serialize(node: &Node) -> String {
    let mut out = String::new();
    serialize_into(node, &mut out);
    out
}

pub fn serialize_into(node: &Node, out: &mut String) {
    match node {
        Node::Document { children, .. } => {
            for c in children {
                serialize_into(c, out);
            }
        }
        Node::Element {
            name,
            attributes,
            children,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                if let Some(value) = value {
                    out.push_str("=\"");
                    escape_attribute(value, out);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            for c in children {
                serialize_into(c, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Text { text, .. } => escape_text(text, out),
        Node::Comment { text, .. } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}
