//! Caret translation between a rendered markup tree and flattened text offsets.
//!
//! The rendered surface is rebuilt from markup on every keystroke, which destroys the nodes the
//! browser selection pointed into. Before a rebuild the caret is flattened into a char offset over
//! the tree's text leaves; after the rebuild that offset is resolved back to a leaf in the new
//! tree. Both directions walk text leaves in document order, so an offset survives any change in
//! how the same text is split across spans.

use crate::selection::SelectionRange;
use crate::text::char_len;
use html::{Id, Node};
use std::ops::ControlFlow;

/// A position inside the rendered tree.
///
/// For a text node `offset` counts chars inside that node. For an element or document it counts
/// child nodes, like a DOM boundary point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretPoint {
    pub node: Id,
    pub offset: usize,
}

impl CaretPoint {
    pub fn new(node: Id, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// The selection currently held by a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSelection {
    pub anchor: CaretPoint,
    pub focus: CaretPoint,
}

impl SurfaceSelection {
    pub fn collapsed(point: CaretPoint) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// Total chars across the text leaves of `root`.
pub fn text_len(root: &Node) -> usize {
    let mut total = 0;
    html::traverse::for_each_text_leaf(root, &mut |_, text| total += char_len(text));
    total
}

/// Flattened char offset of `point` within `root`, or `None` if the point's node is not part of
/// the tree.
pub fn flatten_offset(root: &Node, point: CaretPoint) -> Option<usize> {
    fn walk(node: &Node, point: CaretPoint, before: &mut usize) -> ControlFlow<usize> {
        if node.id() == point.node {
            return match node {
                Node::Text { text, .. } => {
                    ControlFlow::Break(*before + point.offset.min(char_len(text)))
                }
                Node::Comment { .. } => ControlFlow::Break(*before),
                Node::Document { children, .. } | Node::Element { children, .. } => {
                    let preceding: usize = children
                        .iter()
                        .take(point.offset)
                        .map(text_len)
                        .sum();
                    ControlFlow::Break(*before + preceding)
                }
            };
        }
        match node {
            Node::Text { text, .. } => *before += char_len(text),
            Node::Document { children, .. } | Node::Element { children, .. } => {
                for c in children {
                    walk(c, point, before)?;
                }
            }
            Node::Comment { .. } => {}
        }
        ControlFlow::Continue(())
    }

    let mut before = 0;
    match walk(root, point, &mut before) {
        ControlFlow::Break(offset) => Some(offset),
        ControlFlow::Continue(()) => None,
    }
}

/// Resolve a flattened char offset to the first text leaf whose running total reaches it.
///
/// Returns `None` when the tree has no text or the offset lies beyond its text; callers skip
/// caret placement in that case.
pub fn resolve_offset(root: &Node, offset: usize) -> Option<CaretPoint> {
    let mut found = None;
    let mut total = 0;
    html::traverse::for_each_text_leaf(root, &mut |id, text| {
        if found.is_some() {
            return;
        }
        let len = char_len(text);
        if total + len >= offset {
            found = Some(CaretPoint::new(id, offset - total));
        }
        total += len;
    });
    if found.is_none() {
        log::trace!(target: "input.caret", "no text leaf holds offset {offset} (text length {total})");
    }
    found
}

/// The flattened range covered by `selection`.
pub fn selection_range(root: &Node, selection: &SurfaceSelection) -> Option<SelectionRange> {
    let anchor = flatten_offset(root, selection.anchor)?;
    let focus = flatten_offset(root, selection.focus)?;
    Some(SelectionRange::new(anchor, focus))
}

/// The caret offset of the current selection, falling back to `previous` when the surface has no
/// selection inside `root` (for example right after a rebuild).
pub fn capture_offset(
    root: &Node,
    selection: Option<&SurfaceSelection>,
    previous: Option<usize>,
) -> Option<usize> {
    selection
        .and_then(|selection| flatten_offset(root, selection.focus))
        .or(previous)
}
