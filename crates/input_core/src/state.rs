//! Per-widget caret bookkeeping threaded between renders.

use crate::caret::{CaretPoint, SurfaceSelection, capture_offset, resolve_offset};
use html::Node;

/// The last known caret offset of one widget.
///
/// `None` means no caret has been captured yet; restoring is a no-op until one is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaretState {
    offset: Option<usize>,
}

impl CaretState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// Capture the caret from the surface's current selection, keeping the previous offset when
    /// the surface has none.
    pub fn capture(&mut self, root: &Node, selection: Option<&SurfaceSelection>) -> Option<usize> {
        self.offset = capture_offset(root, selection, self.offset);
        self.offset
    }

    /// Where the caret should go in a freshly committed tree.
    pub fn restore_target(
        &mut self,
        root: &Node,
        selection: Option<&SurfaceSelection>,
    ) -> Option<CaretPoint> {
        let offset = self.capture(root, selection)?;
        resolve_offset(root, offset)
    }

    pub fn reset(&mut self) {
        self.offset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_state_restores_nothing() {
        let root = html::parse("hello");
        let mut state = CaretState::new();
        assert_eq!(state.restore_target(&root, None), None);
    }

    #[test]
    fn captured_offset_survives_rebuild() {
        let before = html::parse("#ffffff");
        let mut leaf = None;
        html::traverse::for_each_text_leaf(&before, &mut |id, _| leaf = leaf.or(Some(id)));
        let Some(leaf) = leaf else {
            panic!("expected a text leaf");
        };
        let mut state = CaretState::new();
        let selection = SurfaceSelection::collapsed(CaretPoint::new(leaf, 7));
        assert_eq!(state.capture(&before, Some(&selection)), Some(7));

        let after = html::parse(r#"<span class="hexdot" style="--color: #ffffff">#ffffff</span>"#);
        let target = state.restore_target(&after, None);
        assert!(matches!(target, Some(CaretPoint { offset: 7, .. })));

        state.reset();
        assert_eq!(state.offset(), None);
    }
}
