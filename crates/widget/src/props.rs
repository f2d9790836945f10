//! Consumer configuration for one markup input.

use core_types::{EventResponse, SurfaceEvent};
use input_core::InputId;
use markup::{DEFAULT_HIGHLIGHT_STYLE, HighlightSpec, PatternRule, SwatchConfig};
use std::fmt;

pub type ChangeFn = Box<dyn FnMut(&str)>;
pub type SubmitFn = Box<dyn FnMut()>;
/// Replaces the built-in handling of one event kind entirely.
pub type EventFn = Box<dyn FnMut(&SurfaceEvent) -> EventResponse>;

pub struct InputProps {
    pub id: InputId,
    pub value: String,
    pub rules: Vec<PatternRule>,
    pub on_change: ChangeFn,
    pub on_submit: Option<SubmitFn>,
    pub disabled: bool,
    pub spellcheck: bool,
    pub highlight: HighlightSpec,
    pub swatch: Option<SwatchConfig>,
    pub class: Option<String>,
    pub style: Option<String>,
    pub on_blur: Option<EventFn>,
    pub on_key_up: Option<EventFn>,
    pub on_key_down: Option<EventFn>,
    pub highlight_style: String,
}

impl InputProps {
    pub fn new(id: impl Into<InputId>, on_change: impl FnMut(&str) + 'static) -> Self {
        Self {
            id: id.into(),
            value: String::new(),
            rules: Vec::new(),
            on_change: Box::new(on_change),
            on_submit: None,
            disabled: false,
            spellcheck: true,
            highlight: HighlightSpec::None,
            swatch: None,
            class: None,
            style: None,
            on_blur: None,
            on_key_up: None,
            on_key_down: None,
            highlight_style: DEFAULT_HIGHLIGHT_STYLE.to_string(),
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn rule(mut self, rule: PatternRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = PatternRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn on_submit(mut self, on_submit: impl FnMut() + 'static) -> Self {
        self.on_submit = Some(Box::new(on_submit));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn spellcheck(mut self, spellcheck: bool) -> Self {
        self.spellcheck = spellcheck;
        self
    }

    pub fn highlight(mut self, highlight: impl Into<HighlightSpec>) -> Self {
        self.highlight = highlight.into();
        self
    }

    pub fn swatch(mut self, swatch: SwatchConfig) -> Self {
        self.swatch = Some(swatch);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn on_blur(
        mut self,
        handler: impl FnMut(&SurfaceEvent) -> EventResponse + 'static,
    ) -> Self {
        self.on_blur = Some(Box::new(handler));
        self
    }

    pub fn on_key_up(
        mut self,
        handler: impl FnMut(&SurfaceEvent) -> EventResponse + 'static,
    ) -> Self {
        self.on_key_up = Some(Box::new(handler));
        self
    }

    pub fn on_key_down(
        mut self,
        handler: impl FnMut(&SurfaceEvent) -> EventResponse + 'static,
    ) -> Self {
        self.on_key_down = Some(Box::new(handler));
        self
    }

    pub fn highlight_style(mut self, style: impl Into<String>) -> Self {
        self.highlight_style = style.into();
        self
    }
}

impl fmt::Debug for InputProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputProps")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("rules", &self.rules.len())
            .field("on_submit", &self.on_submit.is_some())
            .field("disabled", &self.disabled)
            .field("spellcheck", &self.spellcheck)
            .field("highlight", &self.highlight)
            .field("swatch", &self.swatch)
            .field("class", &self.class)
            .field("style", &self.style)
            .field("highlight_style", &self.highlight_style)
            .finish_non_exhaustive()
    }
}
