//! Highlight wrapping applied on top of compiled markup.

use crate::error::PatternError;
use crate::rule::ATTRIBUTE_CLOSE_GUARD;
use regex::{Regex, RegexBuilder};

pub const DEFAULT_HIGHLIGHT_STYLE: &str = "background-color: #b4ffc4";

/// What to highlight in the rendered display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HighlightSpec {
    #[default]
    None,
    /// Every case-insensitive occurrence of the literal query.
    Query(String),
    /// The entire display.
    All,
}

impl HighlightSpec {
    pub fn is_active(&self) -> bool {
        match self {
            HighlightSpec::None => false,
            HighlightSpec::Query(query) => !query.is_empty(),
            HighlightSpec::All => true,
        }
    }
}

impl From<&str> for HighlightSpec {
    fn from(query: &str) -> Self {
        HighlightSpec::Query(query.to_string())
    }
}

impl From<String> for HighlightSpec {
    fn from(query: String) -> Self {
        HighlightSpec::Query(query)
    }
}

impl From<bool> for HighlightSpec {
    fn from(all: bool) -> Self {
        if all {
            HighlightSpec::All
        } else {
            HighlightSpec::None
        }
    }
}

/// Escape every regex metacharacter in `query`, all occurrences.
pub fn escape_query(query: &str) -> String {
    regex::escape(query)
}

pub fn highlight_regex(query: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(&escape_query(query))
        .case_insensitive(true)
        .build()
        .map_err(|source| PatternError::InvalidHighlight {
            query: query.to_string(),
            source,
        })
}

/// Wrap highlight matches of `markup` in `<span style="{style}">`.
///
/// A query only matches text content, keeps the matched text's own casing and skips matches
/// followed by the closing-attribute guard. A query that cannot be compiled leaves the markup
/// unhighlighted.
pub fn apply_highlight(markup: &str, spec: &HighlightSpec, style: &str) -> String {
    if markup.is_empty() || !spec.is_active() {
        return markup.to_string();
    }
    let query = match spec {
        HighlightSpec::None => return markup.to_string(),
        HighlightSpec::All => return wrap(markup, style),
        HighlightSpec::Query(query) => query,
    };
    let re = match highlight_regex(query) {
        Ok(re) => re,
        Err(err) => {
            log::warn!(target: "markup.highlight", "highlight skipped: {err}");
            return markup.to_string();
        }
    };

    let mut out = String::with_capacity(markup.len() + 64);
    let mut last = 0;
    let mut wrapped = 0usize;
    for range in html::scan::text_ranges(markup) {
        for m in re.find_iter(&markup[range.clone()]) {
            let (start, end) = (range.start + m.start(), range.start + m.end());
            if start == end || markup[end..].starts_with(ATTRIBUTE_CLOSE_GUARD) {
                continue;
            }
            out.push_str(&markup[last..start]);
            out.push_str(&wrap(&markup[start..end], style));
            last = end;
            wrapped += 1;
        }
    }
    out.push_str(&markup[last..]);
    log::trace!(target: "markup.highlight", "wrapped {wrapped} occurrences of {query:?}");
    out
}

fn wrap(inner: &str, style: &str) -> String {
    let mut out = String::with_capacity(inner.len() + style.len() + 24);
    out.push_str("<span style=\"");
    html::escape_attribute(style, &mut out);
    out.push_str("\">");
    out.push_str(inner);
    out.push_str("</span>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(markup: &str, spec: impl Into<HighlightSpec>) -> String {
        apply_highlight(markup, &spec.into(), DEFAULT_HIGHLIGHT_STYLE)
    }

    #[test]
    fn escape_query_escapes_every_occurrence() {
        assert_eq!(escape_query("a.b.c"), r"a\.b\.c");
        assert_eq!(escape_query("(x)(y)"), r"\(x\)\(y\)");
        assert_eq!(escape_query("**"), r"\*\*");
    }

    #[test]
    fn query_with_metacharacters_matches_literally() {
        assert_eq!(
            highlight("cost $5.00 or 5x00", "$5.00"),
            r#"cost <span style="background-color: #b4ffc4">$5.00</span> or 5x00"#
        );
        assert_eq!(
            highlight("a+b a+b", "a+b"),
            concat!(
                r#"<span style="background-color: #b4ffc4">a+b</span> "#,
                r#"<span style="background-color: #b4ffc4">a+b</span>"#,
            )
        );
    }

    #[test]
    fn query_is_case_insensitive_and_keeps_original_case() {
        assert_eq!(
            highlight("Contact us", "contact"),
            r#"<span style="background-color: #b4ffc4">Contact</span> us"#
        );
    }

    #[test]
    fn query_does_not_touch_tags() {
        let markup = r#"<span class="hexdot" style="--color: #ffffff">#ffffff</span> span"#;
        assert_eq!(
            highlight(markup, "span"),
            r#"<span class="hexdot" style="--color: #ffffff">#ffffff</span> <span style="background-color: #b4ffc4">span</span>"#
        );
    }

    #[test]
    fn all_wraps_once() {
        let out = highlight("a <b>b</b>", true);
        assert_eq!(out, r#"<span style="background-color: #b4ffc4">a <b>b</b></span>"#);
        assert_eq!(out.matches("background-color").count(), 1);
    }

    #[test]
    fn inactive_specs_leave_markup_alone() {
        assert_eq!(highlight("abc", false), "abc");
        assert_eq!(highlight("abc", ""), "abc");
        assert_eq!(highlight("", true), "");
    }
}
