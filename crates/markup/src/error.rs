use std::fmt;

#[derive(Debug)]
pub enum PatternError {
    /// A rule's pattern failed to compile.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    /// The escaped highlight query failed to compile (for example it exceeds the size limit).
    InvalidHighlight {
        query: String,
        source: regex::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidPattern { pattern, source } => {
                write!(f, "invalid rule pattern {pattern:?}: {source}")
            }
            PatternError::InvalidHighlight { query, source } => {
                write!(f, "invalid highlight query {query:?}: {source}")
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::InvalidPattern { source, .. }
            | PatternError::InvalidHighlight { source, .. } => Some(source),
        }
    }
}
