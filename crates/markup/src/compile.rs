use crate::highlight::{DEFAULT_HIGHLIGHT_STYLE, HighlightSpec, apply_highlight};
use crate::rule::{Generator, PatternRule, RuleMatch, evaluate_rules};
use crate::swatch::SwatchConfig;
use input_core::filter_single_line;
use std::ops::Range;

/// Compile logical text into display markup.
///
/// The swatch rule, when enabled, runs after `rules`. Each rule is first checked against the
/// original `text`; matched rules then rewrite the current intermediate string in order.
pub fn compile(text: &str, rules: &[PatternRule], swatch: Option<&SwatchConfig>) -> String {
    if text.is_empty() {
        return String::new();
    }
    let swatch_rule = swatch.and_then(SwatchConfig::rule);
    compile_with(text, rules.iter().chain(swatch_rule.as_ref()))
}

fn compile_with<'a>(text: &str, rules: impl IntoIterator<Item = &'a PatternRule>) -> String {
    let evaluated = evaluate_rules(text, rules);
    let mut current = text.to_string();
    for RuleMatch { rule, matched } in evaluated {
        if matched {
            current = apply_rule(rule, &current);
        }
    }
    let markup = filter_single_line(&current).into_owned();
    log::trace!(target: "markup.compile", "compiled {} chars into {} bytes of markup", text.len(), markup.len());
    markup
}

/// Apply one rule to the current intermediate string. Inserted markup is never re-scanned.
pub fn apply_rule(rule: &PatternRule, current: &str) -> String {
    match rule.generator() {
        Generator::FixedTemplate(template) => replace_with_template(rule, current, template),
        Generator::PerMatch(generate) => {
            let distinct = distinct_matches(rule, current);
            let replacements: Vec<(&str, String)> = distinct
                .into_iter()
                .map(|matched| (matched, generate(matched)))
                .collect();
            replace_literals(rule, current, &replacements)
        }
    }
}

/// Distinct matched substrings, in order of first appearance.
fn distinct_matches<'h>(rule: &PatternRule, haystack: &'h str) -> Vec<&'h str> {
    let mut distinct: Vec<&str> = Vec::new();
    for range in rule.text_matches(haystack) {
        let matched = &haystack[range];
        if !distinct.contains(&matched) {
            distinct.push(matched);
        }
    }
    distinct
}

fn replace_with_template(rule: &PatternRule, current: &str, template: &str) -> String {
    let mut out = String::with_capacity(current.len() + template.len());
    let mut last = 0;
    for range in html::scan::text_ranges(current) {
        for caps in rule.matcher().captures_iter(&current[range.clone()]) {
            let Some(m) = caps.get(0) else {
                continue;
            };
            let (start, end) = (range.start + m.start(), range.start + m.end());
            if start == end || rule.is_guarded(current, end) {
                continue;
            }
            out.push_str(&current[last..start]);
            caps.expand(template, &mut out);
            last = end;
        }
    }
    out.push_str(&current[last..]);
    out
}

/// Replace every literal occurrence of each needle in the text content of `current`, in a single
/// left-to-right pass. Where needles overlap, the leftmost and then longest wins.
fn replace_literals(rule: &PatternRule, current: &str, replacements: &[(&str, String)]) -> String {
    let mut hits: Vec<(Range<usize>, usize)> = Vec::new();
    for range in html::scan::text_ranges(current) {
        let segment = &current[range.clone()];
        for (index, (needle, _)) in replacements.iter().enumerate() {
            if needle.is_empty() {
                continue;
            }
            for (pos, _) in segment.match_indices(needle) {
                let (start, end) = (range.start + pos, range.start + pos + needle.len());
                if !rule.is_guarded(current, end) {
                    hits.push((start..end, index));
                }
            }
        }
    }
    hits.sort_by(|(a, _), (b, _)| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(current.len() + 64 * replacements.len());
    let mut last = 0;
    for (range, index) in hits {
        if range.start < last {
            continue;
        }
        out.push_str(&current[last..range.start]);
        out.push_str(&replacements[index].1);
        last = range.end;
    }
    out.push_str(&current[last..]);
    out
}

/// A rule set plus swatch and highlight settings, compiled once and rendered per value.
#[derive(Clone, Debug)]
pub struct MarkupPipeline {
    rules: Vec<PatternRule>,
    swatch: Option<PatternRule>,
    highlight_style: String,
}

impl Default for MarkupPipeline {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl MarkupPipeline {
    pub fn new(rules: Vec<PatternRule>, swatch: Option<&SwatchConfig>) -> Self {
        Self {
            rules,
            swatch: swatch.and_then(SwatchConfig::rule),
            highlight_style: DEFAULT_HIGHLIGHT_STYLE.to_string(),
        }
    }

    pub fn with_highlight_style(mut self, style: impl Into<String>) -> Self {
        self.highlight_style = style.into();
        self
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn highlight_style(&self) -> &str {
        &self.highlight_style
    }

    /// Markup for `text` without highlighting.
    pub fn compile(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        compile_with(text, self.rules.iter().chain(self.swatch.as_ref()))
    }

    /// Markup for `text` with `highlight` applied on top.
    pub fn render(&self, text: &str, highlight: &HighlightSpec) -> String {
        apply_highlight(&self.compile(text), highlight, &self.highlight_style)
    }
}
