//! Pattern rules: a matcher plus the markup generated for its matches.

use crate::error::PatternError;
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// The closing-attribute marker that guards against re-matching generated markup.
///
/// Generated spans put the matched value last in an attribute (`style="...: #ffffff">`), so a
/// match immediately followed by this marker is an attribute occurrence, not user text.
pub const ATTRIBUTE_CLOSE_GUARD: &str = "\">";

pub type GenerateFn = dyn Fn(&str) -> String + Send + Sync;

/// How a rule turns a match into markup.
#[derive(Clone)]
pub enum Generator {
    /// One template for every match. Uses `regex` replacement syntax: `$0` is the whole match,
    /// `$1`/`$name` are capture groups and `$$` is a literal `$`.
    FixedTemplate(String),
    /// Computed once per distinct matched substring.
    PerMatch(Arc<GenerateFn>),
}

impl Generator {
    pub fn per_match(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Generator::PerMatch(Arc::new(f))
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::FixedTemplate(template) => {
                f.debug_tuple("FixedTemplate").field(template).finish()
            }
            Generator::PerMatch(_) => f.write_str("PerMatch(..)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PatternRule {
    matcher: Regex,
    generator: Generator,
    guard: Option<String>,
}

impl PatternRule {
    pub fn new(pattern: &str, generator: Generator) -> Result<Self, PatternError> {
        let matcher = Regex::new(pattern).map_err(|source| PatternError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::from_regex(matcher, generator))
    }

    pub fn from_regex(matcher: Regex, generator: Generator) -> Self {
        Self {
            matcher,
            generator,
            guard: Some(ATTRIBUTE_CLOSE_GUARD.to_string()),
        }
    }

    pub fn fixed(pattern: &str, template: impl Into<String>) -> Result<Self, PatternError> {
        Self::new(pattern, Generator::FixedTemplate(template.into()))
    }

    pub fn per_match(
        pattern: &str,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Result<Self, PatternError> {
        Self::new(pattern, Generator::per_match(f))
    }

    /// Replace the guard marker. `None` disables the guard.
    pub fn with_guard(mut self, guard: Option<&str>) -> Self {
        self.guard = guard.filter(|g| !g.is_empty()).map(str::to_string);
        self
    }

    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    /// Returns `true` if the text at `end` starts with the guard marker.
    pub(crate) fn is_guarded(&self, haystack: &str, end: usize) -> bool {
        self.guard
            .as_deref()
            .is_some_and(|guard| haystack[end..].starts_with(guard))
    }

    /// Non-empty, unguarded matches inside the text content of `haystack`.
    pub fn text_matches(&self, haystack: &str) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        for range in html::scan::text_ranges(haystack) {
            for m in self.matcher.find_iter(&haystack[range.clone()]) {
                let (start, end) = (range.start + m.start(), range.start + m.end());
                if start == end || self.is_guarded(haystack, end) {
                    continue;
                }
                out.push(start..end);
            }
        }
        out
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        !self.text_matches(haystack).is_empty()
    }
}

/// A rule paired with whether it matched the logical text of the current render.
#[derive(Clone, Copy, Debug)]
pub struct RuleMatch<'a> {
    pub rule: &'a PatternRule,
    pub matched: bool,
}

/// Evaluate every rule against the original text without touching the rules themselves.
pub fn evaluate_rules<'a>(
    text: &str,
    rules: impl IntoIterator<Item = &'a PatternRule>,
) -> Vec<RuleMatch<'a>> {
    rules
        .into_iter()
        .map(|rule| RuleMatch {
            rule,
            matched: rule.is_match(text),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = PatternRule::fixed("(unclosed", "x").map(|_| ());
        assert!(matches!(err, Err(PatternError::InvalidPattern { .. })));
    }

    #[test]
    fn guard_rejects_attribute_occurrences() {
        let rule = PatternRule::fixed("#[0-9a-f]{3}", "$0").map_err(|e| e.to_string());
        let Ok(rule) = rule else {
            panic!("valid pattern");
        };
        assert_eq!(rule.guard(), Some(ATTRIBUTE_CLOSE_GUARD));
        assert_eq!(rule.text_matches("#abc"), vec![0..4]);
        assert!(rule.text_matches("#abc\">").is_empty());
        let unguarded = rule.with_guard(None);
        assert_eq!(unguarded.guard(), None);
        assert_eq!(unguarded.text_matches("#abc\">"), vec![0..4]);
    }

    #[test]
    fn matches_skip_tag_interiors() {
        let Ok(rule) = PatternRule::fixed("red", "x") else {
            panic!("valid pattern");
        };
        let markup = r#"red <span style="color: red; x">red</span>"#;
        let ranges = rule.text_matches(markup);
        assert_eq!(ranges.len(), 2);
        assert!(ranges.iter().all(|r| &markup[r.clone()] == "red"));
        assert_eq!(ranges[0], 0..3);
    }

    #[test]
    fn evaluate_rules_leaves_rules_untouched() {
        let (Ok(a), Ok(b)) = (PatternRule::fixed("foo", "F"), PatternRule::fixed("bar", "B")) else {
            panic!("valid patterns");
        };
        let rules = vec![a, b];
        let evaluated = evaluate_rules("foo only", &rules);
        assert!(evaluated[0].matched);
        assert!(!evaluated[1].matched);
        let again = evaluate_rules("bar only", &rules);
        assert!(!again[0].matched);
        assert!(again[1].matched);
    }

    #[test]
    fn generator_debug_hides_closure() {
        let generator = Generator::per_match(|s| s.to_uppercase());
        assert_eq!(format!("{generator:?}"), "PerMatch(..)");
    }
}
