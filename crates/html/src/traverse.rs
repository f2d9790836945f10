use crate::{Id, Node};

pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        // only assign if currently unset
        if node.id() == Id(0) {
            node.set_id(Id(*next));
            *next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = 1;
    walk(root, &mut next);
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_by_id_mut(c, id))
}

/// Visit every text leaf in document order. Comments are not text-bearing.
pub fn for_each_text_leaf<'a>(node: &'a Node, f: &mut impl FnMut(Id, &'a str)) {
    match node {
        Node::Text { id, text } => f(*id, text),
        Node::Document { children, .. } | Node::Element { children, .. } => {
            for c in children {
                for_each_text_leaf(c, f);
            }
        }
        Node::Comment { .. } => {}
    }
}

/// Concatenated text of all text leaves (the tree's flattened text content).
pub fn collect_text(node: &Node, out: &mut String) {
    for_each_text_leaf(node, &mut |_, text| out.push_str(text));
}

pub fn text_content(node: &Node) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_dom, tokenize};

    fn parsed(markup: &str) -> Node {
        let mut root = build_dom(&tokenize(markup));
        assign_node_ids(&mut root);
        root
    }

    #[test]
    fn ids_are_assigned_in_document_order() {
        let root = parsed("a<span>b</span>c");
        let mut ids = Vec::new();
        for_each_text_leaf(&root, &mut |id, _| ids.push(id));
        assert_eq!(ids, vec![Id(2), Id(4), Id(5)]);
    }

    #[test]
    fn text_content_flattens_leaves_and_skips_comments() {
        let root = parsed("con<span>tact</span><!--x--> #fff");
        assert_eq!(text_content(&root), "contact #fff");
    }

    #[test]
    fn find_node_by_id_mut_edits_leaf() {
        let mut root = parsed("a<span>b</span>");
        if let Some(Node::Text { text, .. }) = find_node_by_id_mut(&mut root, Id(4)) {
            text.push('!');
        }
        assert_eq!(text_content(&root), "ab!");
        assert!(find_node_by_id(&root, Id(99)).is_none());
    }
}
