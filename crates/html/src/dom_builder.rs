use crate::types::{Attribute, Id, Node, Token, TokenStream};

/// Build a document tree from a token stream.
///
/// Unmatched end tags are dropped and elements still open at the end of input are closed
/// implicitly. Adjacent text tokens land in a single text node.
pub fn build_dom(stream: &TokenStream) -> Node {
    let mut arena = NodeArena::new();
    let root_index = arena.push(ArenaNode::Document {
        children: Vec::new(),
    });

    let mut open_elements: Vec<usize> = Vec::new();

    for token in stream.tokens() {
        let parent_index = open_elements.last().copied().unwrap_or(root_index);
        match token {
            Token::Doctype(_) => {}
            Token::Comment(c) => {
                arena.add_child(parent_index, ArenaNode::Comment { text: c.clone() });
            }
            Token::Text(txt) => {
                if !txt.is_empty() {
                    arena.add_text(parent_index, txt);
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let new_index = arena.add_child(
                    parent_index,
                    ArenaNode::Element {
                        name: name.clone(),
                        attributes: attributes.clone(),
                        children: Vec::new(),
                    },
                );
                if !*self_closing {
                    open_elements.push(new_index);
                }
            }
            Token::EndTag(name) => {
                let Some(pos) = open_elements
                    .iter()
                    .rposition(|&index| arena.is_element_named(index, name))
                else {
                    log::trace!(target: "html.dom", "dropping unmatched end tag </{name}>");
                    continue;
                };
                open_elements.truncate(pos);
            }
        }
    }

    arena.into_dom(root_index)
}

#[derive(Debug)]
enum ArenaNode {
    Document {
        children: Vec<usize>,
    },
    Element {
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl ArenaNode {
    fn children(&self) -> Option<&[usize]> {
        match self {
            ArenaNode::Document { children } | ArenaNode::Element { children, .. } => {
                Some(children)
            }
            ArenaNode::Text { .. } | ArenaNode::Comment { .. } => None,
        }
    }
}

#[derive(Debug)]
struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    fn add_child(&mut self, parent_index: usize, child: ArenaNode) -> usize {
        let child_index = self.push(child);
        match &mut self.nodes[parent_index] {
            ArenaNode::Document { children } | ArenaNode::Element { children, .. } => {
                children.push(child_index);
            }
            _ => unreachable!("dom builder parent cannot have children"),
        }
        child_index
    }

    fn add_text(&mut self, parent_index: usize, text: &str) {
        let last = self.nodes[parent_index]
            .children()
            .and_then(|children| children.last().copied());
        if let Some(last) = last {
            if let ArenaNode::Text { text: prev } = &mut self.nodes[last] {
                prev.push_str(text);
                return;
            }
        }
        self.add_child(
            parent_index,
            ArenaNode::Text {
                text: text.to_string(),
            },
        );
    }

    fn is_element_named(&self, node_index: usize, target: &str) -> bool {
        match &self.nodes[node_index] {
            ArenaNode::Element { name, .. } => name.eq_ignore_ascii_case(target),
            _ => false,
        }
    }

    fn into_dom(self, root_index: usize) -> Node {
        let mut nodes = self.nodes;
        let mut built_nodes: Vec<Node> = Vec::with_capacity(nodes.len());

        fn take_children(n: usize, built: &mut Vec<Node>) -> Vec<Node> {
            let split = built.len() - n;
            built.split_off(split)
        }

        // Iterative postorder traversal: a node is built once all of its descendants are on
        // `built_nodes`, and its direct children are then the last `child_count` entries.
        let mut stack: Vec<(usize, bool)> = vec![(root_index, false)];

        while let Some((node_index, visited)) = stack.pop() {
            if !visited {
                stack.push((node_index, true));
                if let Some(children) = nodes[node_index].children() {
                    for &child_index in children.iter().rev() {
                        stack.push((child_index, false));
                    }
                }
                continue;
            }

            let node = match &mut nodes[node_index] {
                ArenaNode::Document { children } => Node::Document {
                    id: Id(0),
                    children: take_children(children.len(), &mut built_nodes),
                },
                ArenaNode::Element {
                    name,
                    attributes,
                    children,
                } => Node::Element {
                    id: Id(0),
                    name: std::mem::take(name),
                    attributes: std::mem::take(attributes),
                    children: take_children(children.len(), &mut built_nodes),
                },
                ArenaNode::Text { text } => Node::Text {
                    id: Id(0),
                    text: std::mem::take(text),
                },
                ArenaNode::Comment { text } => Node::Comment {
                    id: Id(0),
                    text: std::mem::take(text),
                },
            };

            built_nodes.push(node);
        }

        debug_assert_eq!(
            built_nodes.len(),
            1,
            "dom builder should build exactly one root node"
        );
        built_nodes.pop().unwrap_or_else(Node::empty_document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    fn dom(input: &str) -> Node {
        build_dom(&tokenize(input))
    }

    #[test]
    fn build_dom_nests_spans() {
        let root = dom(r#"a<span style="x">b<b>c</b></span>d"#);
        let children = root.children();
        assert_eq!(children.len(), 3);
        assert!(matches!(&children[0], Node::Text { text, .. } if text == "a"));
        assert!(matches!(&children[1], Node::Element { name, children, .. }
            if name == "span" && children.len() == 2));
        assert!(matches!(&children[2], Node::Text { text, .. } if text == "d"));
    }

    #[test]
    fn unmatched_end_tag_is_dropped() {
        let root = dom("<span>a</b>b</span>c");
        let children = root.children();
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[0], Node::Element { children, .. }
            if matches!(&children[..], [Node::Text { text, .. }] if text == "ab")));
    }

    #[test]
    fn unclosed_elements_close_at_end() {
        let root = dom("<span>a<b>b");
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].children().len(), 2);
    }

    #[test]
    fn end_tag_closes_intermediate_elements() {
        let root = dom("<span><b>x</span>y");
        let children = root.children();
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[1], Node::Text { text, .. } if text == "y"));
    }

    #[test]
    fn build_dom_stress_deep_nesting() {
        let depth: usize = 10_000;
        let input = format!("{}{}", "<span>".repeat(depth), "</span>".repeat(depth));
        let root = dom(&input);

        let mut current = &root;
        let mut seen = 0usize;
        loop {
            match current {
                Node::Document { children, .. } => {
                    assert_eq!(children.len(), 1);
                    current = &children[0];
                }
                Node::Element { name, children, .. } => {
                    assert_eq!(name, "span");
                    seen += 1;
                    if seen == depth {
                        assert!(children.is_empty());
                        break;
                    }
                    assert_eq!(children.len(), 1);
                    current = &children[0];
                }
                Node::Text { .. } | Node::Comment { .. } => {
                    panic!("unexpected leaf node before reaching depth");
                }
            }
        }
    }
}
