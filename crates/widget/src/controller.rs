//! The widget controller: owns a surface and keeps it in step with the consumer's value.

use crate::props::{ChangeFn, EventFn, InputProps, SubmitFn};
use crate::surface::{DEFAULT_INPUT_CLASS, Surface, SurfaceAttributes};
use core_types::{EventResponse, SurfaceEvent};
use input_core::{CaretState, InputId};
use markup::{HighlightSpec, MarkupPipeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// The surface shows the markup of the current value.
    Idle,
    /// An edit was captured and emitted; waiting for the consumer to set the new value.
    Editing,
}

/// A single-line input whose display is markup derived from plain text.
///
/// The consumer owns the value: edits are reported through the change callback, and the display
/// only changes when the consumer calls [`MarkupInput::set_value`].
pub struct MarkupInput<S: Surface> {
    id: InputId,
    surface: S,
    pipeline: MarkupPipeline,
    value: String,
    highlight: HighlightSpec,
    markup: String,
    caret: CaretState,
    state: ControllerState,
    disabled: bool,
    spellcheck: bool,
    class: Option<String>,
    style: Option<String>,
    on_change: ChangeFn,
    on_submit: Option<SubmitFn>,
    on_blur: Option<EventFn>,
    on_key_up: Option<EventFn>,
    on_key_down: Option<EventFn>,
}

impl<S: Surface> MarkupInput<S> {
    /// Take ownership of `surface`, apply its attributes and render the initial value.
    pub fn new(props: InputProps, surface: S) -> Self {
        let InputProps {
            id,
            value,
            rules,
            on_change,
            on_submit,
            disabled,
            spellcheck,
            highlight,
            swatch,
            class,
            style,
            on_blur,
            on_key_up,
            on_key_down,
            highlight_style,
        } = props;
        let pipeline = MarkupPipeline::new(rules, swatch.as_ref()).with_highlight_style(highlight_style);
        let mut input = Self {
            id,
            surface,
            pipeline,
            value,
            highlight,
            markup: String::new(),
            caret: CaretState::new(),
            state: ControllerState::Idle,
            disabled,
            spellcheck,
            class,
            style,
            on_change,
            on_submit,
            on_blur,
            on_key_up,
            on_key_down,
        };
        input.apply_attributes();
        input.render();
        input
    }

    pub fn id(&self) -> &InputId {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The sanitized markup last committed to the surface.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn highlight(&self) -> &HighlightSpec {
        &self.highlight
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The caret offset carried to the next render, if one was captured.
    pub fn caret_offset(&self) -> Option<usize> {
        self.caret.offset()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Handle one event from the surface.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> EventResponse {
        if self.disabled {
            log::trace!(target: "widget.controller", "{}: ignoring {event:?} while disabled", self.id);
            return EventResponse::IGNORED;
        }
        let handler = match &event {
            SurfaceEvent::Blur => self.on_blur.as_mut(),
            SurfaceEvent::KeyUp(_) => self.on_key_up.as_mut(),
            SurfaceEvent::KeyDown(_) => self.on_key_down.as_mut(),
            SurfaceEvent::Input | SurfaceEvent::Focus => None,
        };
        if let Some(handler) = handler {
            return handler(&event);
        }
        match &event {
            SurfaceEvent::KeyDown(key) if key.is_enter() => self.submit(),
            SurfaceEvent::KeyUp(key) if key.is_enter() => EventResponse {
                prevent_default: true,
                ..EventResponse::default()
            },
            SurfaceEvent::Focus => EventResponse::IGNORED,
            _ => self.emit_change(),
        }
    }

    fn submit(&mut self) -> EventResponse {
        let submitted = match self.on_submit.as_mut() {
            Some(on_submit) => {
                on_submit();
                true
            }
            None => false,
        };
        log::debug!(target: "widget.controller", "{}: enter pressed (submitted: {submitted})", self.id);
        EventResponse {
            prevent_default: true,
            submitted,
            ..EventResponse::default()
        }
    }

    /// Capture the caret and report the surface's text if it differs from the value.
    fn emit_change(&mut self) -> EventResponse {
        let selection = self.surface.selection();
        let offset = self.caret.capture(self.surface.document(), selection.as_ref());
        let text = self.surface.plain_text();
        if text == self.value {
            return EventResponse::IGNORED;
        }
        log::trace!(
            target: "widget.controller",
            "{}: emitting {} chars, caret at {offset:?}",
            self.id,
            text.chars().count()
        );
        self.state = ControllerState::Editing;
        (self.on_change)(&text);
        EventResponse {
            changed: true,
            ..EventResponse::default()
        }
    }

    /// Set the consumer's value. Re-renders only when the value changed.
    pub fn set_value(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.value {
            self.state = ControllerState::Idle;
            return false;
        }
        self.value = value;
        self.render();
        true
    }

    /// Change what is highlighted. Re-renders only when the highlight changed.
    pub fn set_highlight(&mut self, highlight: impl Into<HighlightSpec>) -> bool {
        let highlight = highlight.into();
        if highlight == self.highlight {
            return false;
        }
        self.highlight = highlight;
        self.render();
        true
    }

    /// Make the surface read-only (or editable again). The markup stays displayed.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        self.apply_attributes();
    }

    /// Put the caret back at the captured offset in the current tree.
    ///
    /// A no-op when no offset was captured yet or the offset lies beyond the rendered text.
    pub fn restore_caret(&mut self) {
        let selection = self.surface.selection();
        let target = self
            .caret
            .restore_target(self.surface.document(), selection.as_ref());
        match target {
            Some(point) => {
                log::trace!(target: "widget.controller", "{}: caret restored to {point:?}", self.id);
                self.surface.place_caret(point);
            }
            None => {
                log::trace!(target: "widget.controller", "{}: no caret target", self.id);
            }
        }
        self.state = ControllerState::Idle;
    }

    /// Derive markup from the value and highlight, commit it when it changed and restore the
    /// caret afterwards.
    fn render(&mut self) {
        let markup = html::sanitize(&self.pipeline.render(&self.value, &self.highlight));
        if markup == self.markup {
            self.state = ControllerState::Idle;
            return;
        }
        self.surface.commit_markup(&markup);
        self.markup = markup;
        self.restore_caret();
    }

    fn apply_attributes(&mut self) {
        let attrs = SurfaceAttributes {
            id: self.id.clone(),
            editable: !self.disabled,
            spellcheck: self.spellcheck,
            class: self
                .class
                .clone()
                .unwrap_or_else(|| DEFAULT_INPUT_CLASS.to_string()),
            style: self.style.clone(),
        };
        self.surface.apply_attributes(&attrs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DomSurface;
    use core_types::Key;
    use markup::SwatchConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn input_with(props: impl FnOnce(InputProps) -> InputProps) -> (MarkupInput<DomSurface>, Log) {
        let changes: Log = Rc::default();
        let sink = Rc::clone(&changes);
        let props = props(InputProps::new("field", move |text| {
            sink.borrow_mut().push(text.to_string())
        }));
        (MarkupInput::new(props, DomSurface::new()), changes)
    }

    #[test]
    fn initial_value_is_rendered() {
        let (input, _) = input_with(|p| p.value("hi #00ff00").swatch(SwatchConfig::default()));
        assert!(input.markup().starts_with("hi <span class=\"hexdot\""));
        assert_eq!(input.surface().plain_text(), "hi #00ff00");
        assert_eq!(input.surface().attributes().class, DEFAULT_INPUT_CLASS);
        assert_eq!(input.state(), ControllerState::Idle);
        assert_eq!(input.caret_offset(), None);
    }

    #[test]
    fn input_event_emits_text_and_enters_editing() {
        let (mut input, changes) = input_with(|p| p.value("ab"));
        input.surface_mut().type_text("c");
        let response = input.handle_event(SurfaceEvent::Input);
        assert!(response.changed);
        assert_eq!(changes.borrow().as_slice(), ["abc"]);
        assert_eq!(input.state(), ControllerState::Editing);
        assert_eq!(input.caret_offset(), Some(3));
        input.set_value("abc");
        let response = input.handle_event(SurfaceEvent::KeyUp(Key::Character('c')));
        assert!(!response.changed);
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn set_value_returns_to_idle() {
        let (mut input, _) = input_with(|p| p.value("ab"));
        input.surface_mut().type_text("c");
        input.handle_event(SurfaceEvent::Input);
        assert!(input.set_value("abc"));
        assert_eq!(input.state(), ControllerState::Idle);
        assert_eq!(input.surface().caret_offset(), Some(3));
        assert!(!input.set_value("abc"));
    }

    #[test]
    fn focus_is_ignored() {
        let (mut input, changes) = input_with(|p| p.value("a"));
        input.surface_mut().type_text("b");
        assert_eq!(input.handle_event(SurfaceEvent::Focus), EventResponse::IGNORED);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn overrides_replace_default_handling() {
        let seen: Log = Rc::default();
        let sink = Rc::clone(&seen);
        let (mut input, changes) = input_with(move |p| {
            p.value("a").on_blur(move |event| {
                sink.borrow_mut().push(format!("{event:?}"));
                EventResponse::IGNORED
            })
        });
        input.surface_mut().type_text("b");
        input.handle_event(SurfaceEvent::Blur);
        assert_eq!(seen.borrow().as_slice(), ["Blur"]);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn set_disabled_toggles_editable() {
        let (mut input, _) = input_with(|p| p.value("a").spellcheck(false).style("width: 100%"));
        input.set_disabled(true);
        assert!(input.is_disabled());
        assert!(!input.surface().attributes().editable);
        assert!(!input.surface().attributes().spellcheck);
        assert_eq!(input.surface().attributes().style.as_deref(), Some("width: 100%"));
        assert_eq!(input.markup(), "a");
        input.set_disabled(false);
        assert!(input.surface().attributes().editable);
    }
}
