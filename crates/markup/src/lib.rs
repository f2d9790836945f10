//! Pattern compiler for the markup input widget.
//!
//! Turns the logical text of an input into display markup:
//!
//! - [`PatternRule`]: a regex plus a [`Generator`] producing markup for its matches
//! - [`SwatchConfig`]: the built-in hex color swatch rule
//! - [`HighlightSpec`]: query or whole-display highlighting layered on top
//! - [`compile`] and [`MarkupPipeline`]: the render entry points
//!
//! Substitution only ever touches text content. Tags and attribute values emitted by an earlier
//! rule are left alone by later rules and by the highlighter.

mod compile;
mod error;
mod highlight;
mod rule;
mod swatch;

pub use crate::compile::{MarkupPipeline, apply_rule, compile};
pub use crate::error::PatternError;
pub use crate::highlight::{
    DEFAULT_HIGHLIGHT_STYLE, HighlightSpec, apply_highlight, escape_query, highlight_regex,
};
pub use crate::rule::{
    ATTRIBUTE_CLOSE_GUARD, GenerateFn, Generator, PatternRule, RuleMatch, evaluate_rules,
};
pub use crate::swatch::{SWATCH_PATTERN, SwatchConfig, SwatchStyle, swatch_markup};
