//! # widget
//!
//! An editable single-line input whose display is markup compiled from plain text.
//!
//! - [`MarkupInput`]: the controller. Owns a [`Surface`], reports edits, re-renders on value or
//!   highlight changes and keeps the caret where the user left it.
//! - [`InputProps`]: consumer configuration and callbacks.
//! - [`Surface`]: the seam a host implements for its editable element; [`DomSurface`] is the
//!   in-memory implementation.

mod controller;
mod props;
mod surface;

pub use crate::controller::{ControllerState, MarkupInput};
pub use crate::props::{ChangeFn, EventFn, InputProps, SubmitFn};
pub use crate::surface::{DEFAULT_INPUT_CLASS, DomSurface, Surface, SurfaceAttributes};
