//! Editable single-line input that displays markup compiled from plain text.
//!
//! The consumer owns a plain-text value. Pattern rules, an optional hex color swatch and an
//! optional highlight turn that value into display markup, which is committed to an editable
//! [`Surface`]. Edits are reported back as plain text and the caret survives every re-render.
//!
//! ```
//! use markup_input::{DomSurface, InputProps, MarkupInput, SwatchConfig};
//!
//! let props = InputProps::new("color", |_| {})
//!     .value("paint it #336699")
//!     .swatch(SwatchConfig::default());
//! let input = MarkupInput::new(props, DomSurface::new());
//! assert!(input.markup().contains(r#"class="hexdot""#));
//! ```

pub use core_types::{EventResponse, Key, SurfaceEvent};
pub use html::{Id, Node, sanitize};
pub use input_core::{CaretPoint, CaretState, InputId, SurfaceSelection};
pub use markup::{
    Generator, HighlightSpec, MarkupPipeline, PatternError, PatternRule, SwatchConfig,
    SwatchStyle, compile,
};
pub use widget::{
    ControllerState, DomSurface, InputProps, MarkupInput, Surface, SurfaceAttributes,
};
