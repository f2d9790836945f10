//! # input_core
//!
//! UI-agnostic caret and text layer for the markup input widget.
//!
//! - [`InputId`]: identifier a host binds a surface to
//! - [`caret`]: flattening a caret into a char offset and resolving it back into a rebuilt tree
//! - [`CaretState`]: the offset threaded from one render to the next
//! - [`SelectionRange`]: a selection in flattened char offsets
//!
//! ## Design Principles
//!
//! This crate does not depend on any UI framework. It works on [`html::Node`] trees, which a
//! host produces from whatever its rendered surface currently holds.

pub mod caret;

mod id;
mod selection;
mod state;
mod text;

pub use caret::{CaretPoint, SurfaceSelection};
pub use id::InputId;
pub use selection::SelectionRange;
pub use state::CaretState;
pub use text::{char_len, char_to_byte, filter_single_line};
