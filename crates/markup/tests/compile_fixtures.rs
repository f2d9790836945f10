use markup::{HighlightSpec, MarkupPipeline, PatternRule, SwatchConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct Fixture {
    input: String,
    expected: String,
    #[serde(default)]
    highlight: Option<String>,
    #[serde(default)]
    highlight_all: bool,
    #[serde(default)]
    swatch: Option<SwatchConfig>,
    #[serde(default)]
    rules: Vec<RuleFixture>,
}

#[derive(Debug, Deserialize)]
struct RuleFixture {
    pattern: String,
    template: String,
}

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/compile")
}

fn load_fixtures() -> Vec<(String, Fixture)> {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixture_dir())
        .unwrap_or_else(|err| panic!("read fixture dir: {err}"))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    paths
        .into_iter()
        .map(|path| {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let source = fs::read_to_string(&path)
                .unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
            let fixture: Fixture = toml::from_str(&source)
                .unwrap_or_else(|err| panic!("parse {}: {err}", path.display()));
            (name, fixture)
        })
        .collect()
}

fn pipeline_for(name: &str, fixture: &Fixture) -> MarkupPipeline {
    let rules = fixture
        .rules
        .iter()
        .map(|rule| {
            PatternRule::fixed(&rule.pattern, rule.template.as_str())
                .unwrap_or_else(|err| panic!("fixture '{name}': {err}"))
        })
        .collect();
    MarkupPipeline::new(rules, fixture.swatch.as_ref())
}

fn highlight_for(fixture: &Fixture) -> HighlightSpec {
    match (&fixture.highlight, fixture.highlight_all) {
        (_, true) => HighlightSpec::All,
        (Some(query), false) => HighlightSpec::from(query.as_str()),
        (None, false) => HighlightSpec::None,
    }
}

#[test]
fn compile_fixtures() {
    let fixtures = load_fixtures();
    assert!(!fixtures.is_empty(), "no compile fixtures found");
    for (name, fixture) in &fixtures {
        let pipeline = pipeline_for(name, fixture);
        let actual = pipeline.render(&fixture.input, &highlight_for(fixture));
        assert_eq!(actual, fixture.expected, "fixture '{name}'");
    }
}

#[test]
fn compiled_markup_round_trips_to_plain_text() {
    for (name, fixture) in load_fixtures() {
        let pipeline = pipeline_for(&name, &fixture);
        let markup = pipeline.render(&fixture.input, &highlight_for(&fixture));
        let text = html::traverse::text_content(&html::parse(&markup));
        let expected: String = fixture
            .input
            .chars()
            .filter(|c| *c != '\r' && *c != '\n')
            .collect();
        assert_eq!(text, expected, "fixture '{name}'");
    }
}

#[test]
fn compile_is_idempotent_over_the_same_text() {
    for (name, fixture) in load_fixtures() {
        let pipeline = pipeline_for(&name, &fixture);
        let first = pipeline.compile(&fixture.input);
        let second = pipeline.compile(&fixture.input);
        assert_eq!(first, second, "fixture '{name}'");
    }
}

#[test]
fn swatch_attribute_occurrence_is_never_wrapped_twice() {
    let pipeline = MarkupPipeline::new(Vec::new(), Some(&SwatchConfig::default()));
    let markup = pipeline.compile("#ffffff");
    assert_eq!(markup.matches("<span").count(), 1);
    assert!(markup.contains("--color: #ffffff\">#ffffff</span>"));
    // feeding the markup back in only touches its text content
    let Some(rule) = SwatchConfig::default().rule() else {
        panic!("enabled swatch has a rule");
    };
    assert_eq!(rule.text_matches(&markup).len(), 1);
}
