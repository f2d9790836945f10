//! Event vocabulary shared between the caret layer and the widget host.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    Character(char),
    Other(String),
}

impl Key {
    pub fn is_enter(&self) -> bool {
        matches!(self, Key::Enter)
    }
}

/// Raw events a host forwards from its editable surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface content was edited by the user.
    Input,
    KeyDown(Key),
    KeyUp(Key),
    Blur,
    Focus,
}

/// What the host should do with the native event after the widget handled it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub changed: bool,
    pub submitted: bool,
}

impl EventResponse {
    pub const IGNORED: Self = Self {
        prevent_default: false,
        changed: false,
        submitted: false,
    };
}
