//! Identifier for a widget instance.
//!
//! Hosts bind a mounted surface to this identifier (for example the DOM `id` attribute). The
//! controller owns its surface directly and never resolves it through the identifier, so two
//! widgets sharing an id cannot steal each other's surface; the id is only passed through to the
//! host and used in log output.

use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputId(String);

impl InputId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for InputId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for InputId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_id_from_str_and_string() {
        assert_eq!(InputId::from("search"), InputId::from("search".to_string()));
        assert_eq!(InputId::new("search").as_str(), "search");
    }

    #[test]
    fn input_id_display() {
        assert_eq!(InputId::new("color-field").to_string(), "color-field");
        assert!(InputId::default().is_empty());
    }
}
