#![no_main]

use libfuzzer_sys::fuzz_target;
use markup::{HighlightSpec, MarkupPipeline, SwatchConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    // first line is the value, the rest is the highlight query
    let (value, query) = input.split_once('\n').unwrap_or((input, ""));
    if value.contains(['<', '>', '&']) {
        return;
    }
    let pipeline = MarkupPipeline::new(Vec::new(), Some(&SwatchConfig::default()));
    let markup = html::sanitize(&pipeline.render(value, &HighlightSpec::from(query)));
    let text = html::traverse::text_content(&html::parse(&markup));
    let expected: String = value.chars().filter(|c| *c != '\r' && *c != '\n').collect();
    assert_eq!(text, expected);
});
