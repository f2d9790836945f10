//! Built-in rule that decorates hex color codes with a color swatch.

use crate::rule::{Generator, PatternRule};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Six hex digits after `#`, any case.
pub const SWATCH_PATTERN: &str = r"(?i)#[0-9a-f]{6}";

const WHITE_BORDER: &str = "1px solid #A3A3A3";

static SWATCH_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(SWATCH_PATTERN).ok());

/// Swatch dimensions, passed through to the span as CSS custom properties.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SwatchStyle {
    pub width: String,
    pub height: String,
    pub top: String,
    pub left: String,
}

impl Default for SwatchStyle {
    fn default() -> Self {
        Self {
            width: "8px".to_string(),
            height: "8px".to_string(),
            top: "0px".to_string(),
            left: "0px".to_string(),
        }
    }
}

/// Host configuration for the color swatch rule.
///
/// Supplying a config enables the swatch unless `enabled` is explicitly `false`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SwatchConfig {
    #[serde(alias = "enable")]
    pub enabled: bool,
    #[serde(alias = "dimensions")]
    pub style: SwatchStyle,
    pub class_name: String,
}

impl Default for SwatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            style: SwatchStyle::default(),
            class_name: "hexdot".to_string(),
        }
    }
}

impl SwatchConfig {
    /// The swatch rule for this config, or `None` when disabled.
    pub fn rule(&self) -> Option<PatternRule> {
        if !self.enabled {
            return None;
        }
        let Some(matcher) = SWATCH_REGEX.as_ref() else {
            log::warn!(target: "markup.swatch", "swatch pattern failed to compile");
            return None;
        };
        let config = self.clone();
        Some(PatternRule::from_regex(
            matcher.clone(),
            Generator::per_match(move |color| swatch_markup(color, &config)),
        ))
    }
}

/// The span wrapping one hex color. The color is the last attribute value, so the attribute
/// occurrence is followed by `">` and is skipped by the rule guard on later passes.
pub fn swatch_markup(color: &str, config: &SwatchConfig) -> String {
    let border = if color.eq_ignore_ascii_case("#ffffff") {
        WHITE_BORDER
    } else {
        "unset"
    };
    let mut out = String::with_capacity(160 + color.len() * 2);
    out.push_str("<span class=\"");
    html::escape_attribute(&config.class_name, &mut out);
    out.push_str("\" style=\"");
    for (property, value) in [
        ("width", config.style.width.as_str()),
        ("height", config.style.height.as_str()),
        ("top", config.style.top.as_str()),
        ("left", config.style.left.as_str()),
        ("border", border),
    ] {
        out.push_str("--");
        out.push_str(property);
        out.push_str(": ");
        html::escape_attribute(value, &mut out);
        out.push_str("; ");
    }
    out.push_str("--color: ");
    out.push_str(color);
    out.push_str("\">");
    out.push_str(color);
    out.push_str("</span>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swatch_markup_layout() {
        let config = SwatchConfig::default();
        assert_eq!(
            swatch_markup("#12ab34", &config),
            concat!(
                r#"<span class="hexdot" style="--width: 8px; --height: 8px; --top: 0px; "#,
                r#"--left: 0px; --border: unset; --color: #12ab34">#12ab34</span>"#,
            )
        );
    }

    #[test]
    fn white_gets_a_border() {
        let markup = swatch_markup("#FFFFFF", &SwatchConfig::default());
        assert!(markup.contains("--border: 1px solid #A3A3A3;"));
    }

    #[test]
    fn disabled_config_has_no_rule() {
        let config = SwatchConfig {
            enabled: false,
            ..SwatchConfig::default()
        };
        assert!(config.rule().is_none());
        assert!(SwatchConfig::default().rule().is_some());
    }

    #[test]
    fn rule_matches_six_digit_hex_only() {
        let Some(rule) = SwatchConfig::default().rule() else {
            panic!("enabled swatch has a rule");
        };
        assert!(rule.is_match("color #A0b1C2"));
        assert!(!rule.is_match("color #fff"));
        assert!(!rule.is_match("#ffffff\">"));
    }

    #[test]
    fn config_accepts_host_object_shape() {
        let config: SwatchConfig = serde_json::from_str(
            r#"{"enable": true, "style": {"width": "6px", "height": "6px", "top": "1px", "left": "2px"}}"#,
        )
        .expect("swatch json");
        assert!(config.enabled);
        assert_eq!(config.class_name, "hexdot");
        assert_eq!(config.style.left, "2px");

        let partial: SwatchConfig = serde_json::from_str(r#"{"style": {"width": "4px"}}"#)
            .expect("partial swatch json");
        assert!(partial.enabled);
        assert_eq!(partial.style.width, "4px");
        assert_eq!(partial.style.height, "8px");
    }
}
