//! The host seam: an editable surface the controller renders into.

use html::Node;
use html::traverse::{find_node_by_id, find_node_by_id_mut, text_content};
use input_core::caret::{flatten_offset, resolve_offset, selection_range, text_len};
use input_core::{
    CaretPoint, InputId, SelectionRange, SurfaceSelection, char_len, char_to_byte,
    filter_single_line,
};

/// Class applied to the surface when the consumer supplies none.
pub const DEFAULT_INPUT_CLASS: &str = "input";

/// Element attributes a host mirrors onto its editable element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceAttributes {
    pub id: InputId,
    pub editable: bool,
    pub spellcheck: bool,
    pub class: String,
    pub style: Option<String>,
}

impl Default for SurfaceAttributes {
    fn default() -> Self {
        Self {
            id: InputId::default(),
            editable: true,
            spellcheck: true,
            class: DEFAULT_INPUT_CLASS.to_string(),
            style: None,
        }
    }
}

/// An editable element whose content is replaced wholesale by trusted markup.
///
/// Committing markup rebuilds the rendered tree, so any selection inside the old tree is lost.
/// The controller captures the caret before a commit and places it again afterwards.
pub trait Surface {
    /// Replace the rendered content with `markup`.
    fn commit_markup(&mut self, markup: &str);

    /// The currently rendered tree.
    fn document(&self) -> &Node;

    /// The selection inside the surface, if it holds one.
    fn selection(&self) -> Option<SurfaceSelection>;

    /// Collapse the selection to `point`.
    fn place_caret(&mut self, point: CaretPoint);

    fn apply_attributes(&mut self, attrs: &SurfaceAttributes);

    /// The surface's text as the user sees it, on a single line.
    fn plain_text(&self) -> String {
        filter_single_line(&text_content(self.document())).into_owned()
    }
}

/// In-memory surface backed by an [`html::Node`] tree.
///
/// Stands in for a browser element in tests and non-browser hosts. Editing helpers mutate the
/// rendered tree in place the way a browser does while the user types, without re-rendering.
#[derive(Clone, Debug)]
pub struct DomSurface {
    root: Node,
    markup: String,
    selection: Option<SurfaceSelection>,
    attributes: SurfaceAttributes,
    commits: usize,
}

impl Default for DomSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DomSurface {
    pub fn new() -> Self {
        Self {
            root: html::parse(""),
            markup: String::new(),
            selection: None,
            attributes: SurfaceAttributes::default(),
            commits: 0,
        }
    }

    /// The last committed markup. Edits made through the helpers below are not reflected here.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn attributes(&self) -> &SurfaceAttributes {
        &self.attributes
    }

    /// Number of times markup has been committed.
    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn set_selection(&mut self, selection: Option<SurfaceSelection>) {
        self.selection = selection;
    }

    /// Place a collapsed caret at a flattened char offset. Returns `false` if no text leaf
    /// holds that offset.
    pub fn select_offset(&mut self, offset: usize) -> bool {
        match resolve_offset(&self.root, offset) {
            Some(point) => {
                self.selection = Some(SurfaceSelection::collapsed(point));
                true
            }
            None => false,
        }
    }

    /// Select the chars between two flattened offsets, in either order.
    pub fn select_range(&mut self, anchor: usize, focus: usize) -> bool {
        match (resolve_offset(&self.root, anchor), resolve_offset(&self.root, focus)) {
            (Some(anchor), Some(focus)) => {
                self.selection = Some(SurfaceSelection { anchor, focus });
                true
            }
            _ => false,
        }
    }

    /// The selected text, if the selection spans any.
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection_range().filter(|range| !range.is_empty())?;
        Some(range.slice(&text_content(&self.root)).to_string())
    }

    /// Flattened char offset of the selection focus.
    pub fn caret_offset(&self) -> Option<usize> {
        self.selection
            .and_then(|selection| flatten_offset(&self.root, selection.focus))
    }

    /// Insert `text` at the caret (at the end when there is no caret) and move the caret past
    /// it. Newlines are dropped. Returns `false` when the surface is not editable.
    pub fn type_text(&mut self, text: &str) -> bool {
        if !self.attributes.editable {
            return false;
        }
        let text = filter_single_line(text);
        let replaced = self.delete_selection();
        if text.is_empty() {
            return replaced;
        }
        let point = match self.insertion_point() {
            Some(point) => point,
            None => self.append_leaf(),
        };
        if let Some(Node::Text { text: leaf, .. }) = find_node_by_id_mut(&mut self.root, point.node) {
            let at = char_to_byte(leaf, point.offset);
            leaf.insert_str(at, &text);
        }
        let caret = CaretPoint::new(point.node, point.offset + char_len(&text));
        self.selection = Some(SurfaceSelection::collapsed(caret));
        true
    }

    /// Delete the char before the caret. Returns `false` when nothing was deleted.
    pub fn backspace(&mut self) -> bool {
        if !self.attributes.editable {
            return false;
        }
        if self.delete_selection() {
            return true;
        }
        let offset = self.caret_offset().unwrap_or_else(|| text_len(&self.root));
        if offset == 0 {
            return false;
        }
        let Some(point) = resolve_offset(&self.root, offset) else {
            return false;
        };
        let Some(Node::Text { text: leaf, .. }) = find_node_by_id_mut(&mut self.root, point.node)
        else {
            return false;
        };
        let start = char_to_byte(leaf, point.offset - 1);
        let end = char_to_byte(leaf, point.offset);
        leaf.replace_range(start..end, "");
        let caret = CaretPoint::new(point.node, point.offset - 1);
        self.selection = Some(SurfaceSelection::collapsed(caret));
        true
    }

    fn selection_range(&self) -> Option<SelectionRange> {
        self.selection
            .and_then(|selection| selection_range(&self.root, &selection))
    }

    /// Delete the selected chars and collapse the caret to where they started. Returns `false`
    /// when there was nothing selected.
    fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection_range().filter(|range| !range.is_empty()) else {
            return false;
        };
        delete_chars(&mut self.root, range, &mut 0);
        self.selection = resolve_offset(&self.root, range.start).map(SurfaceSelection::collapsed);
        true
    }

    fn insertion_point(&self) -> Option<CaretPoint> {
        if let Some(selection) = self.selection {
            if matches!(
                find_node_by_id(&self.root, selection.focus.node),
                Some(Node::Text { .. })
            ) {
                return Some(selection.focus);
            }
            if let Some(offset) = flatten_offset(&self.root, selection.focus) {
                return resolve_offset(&self.root, offset);
            }
        }
        resolve_offset(&self.root, text_len(&self.root))
    }

    /// Append an empty text leaf to the document for typing into an empty surface.
    fn append_leaf(&mut self) -> CaretPoint {
        let id = html::Id(max_id(&self.root).0.wrapping_add(1));
        if let Some(children) = self.root.children_mut() {
            children.push(Node::Text {
                id,
                text: String::new(),
            });
        }
        CaretPoint::new(id, 0)
    }
}

fn delete_chars(node: &mut Node, range: SelectionRange, before: &mut usize) {
    match node {
        Node::Text { text, .. } => {
            let len = char_len(text);
            let start = range.start.saturating_sub(*before).min(len);
            let end = range.end.saturating_sub(*before).min(len);
            if start < end {
                let (from, to) = (char_to_byte(text, start), char_to_byte(text, end));
                text.replace_range(from..to, "");
            }
            *before += len;
        }
        Node::Document { children, .. } | Node::Element { children, .. } => {
            for child in children {
                delete_chars(child, range, before);
            }
        }
        Node::Comment { .. } => {}
    }
}

fn max_id(node: &Node) -> html::Id {
    node.children()
        .iter()
        .map(max_id)
        .fold(node.id(), |a, b| if b.0 > a.0 { b } else { a })
}

impl Surface for DomSurface {
    fn commit_markup(&mut self, markup: &str) {
        self.root = html::parse(markup);
        self.markup = markup.to_string();
        self.selection = None;
        self.commits += 1;
        log::trace!(target: "widget.surface", "committed {} bytes", markup.len());
    }

    fn document(&self) -> &Node {
        &self.root
    }

    fn selection(&self) -> Option<SurfaceSelection> {
        self.selection
    }

    fn place_caret(&mut self, point: CaretPoint) {
        self.selection = Some(SurfaceSelection::collapsed(point));
    }

    fn apply_attributes(&mut self, attrs: &SurfaceAttributes) {
        self.attributes = attrs.clone();
    }
}
