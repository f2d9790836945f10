use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markup::{HighlightSpec, MarkupPipeline, PatternRule, SwatchConfig};

const SHORT_WORDS: usize = 16;
const LONG_WORDS: usize = 4_000;

fn make_text(words: usize) -> String {
    let palette = ["#ffffff", "#12ab34", "ticket", "ABC-12", "@ann", "plain"];
    let mut out = String::with_capacity(words * 8);
    for i in 0..words {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(palette[i % palette.len()]);
    }
    out
}

fn make_pipeline() -> MarkupPipeline {
    let rules = [
        PatternRule::fixed(r"[A-Z]+-\d+", r#"<a href="#$0">$0</a>"#),
        PatternRule::fixed(r"@\w+", "<b>$0</b>"),
    ]
    .into_iter()
    .filter_map(Result::ok)
    .collect();
    MarkupPipeline::new(rules, Some(&SwatchConfig::default()))
}

fn bench_compile_short(c: &mut Criterion) {
    let pipeline = make_pipeline();
    let input = make_text(SHORT_WORDS);
    c.bench_function("bench_compile_short", |b| {
        b.iter(|| black_box(pipeline.compile(black_box(&input))));
    });
}

fn bench_compile_long(c: &mut Criterion) {
    let pipeline = make_pipeline();
    let input = make_text(LONG_WORDS);
    c.bench_function("bench_compile_long", |b| {
        b.iter(|| black_box(pipeline.compile(black_box(&input))));
    });
}

fn bench_render_highlight(c: &mut Criterion) {
    let pipeline = make_pipeline();
    let input = make_text(LONG_WORDS);
    let highlight = HighlightSpec::from("ticket");
    c.bench_function("bench_render_highlight", |b| {
        b.iter(|| black_box(pipeline.render(black_box(&input), &highlight)));
    });
}

criterion_group!(
    benches,
    bench_compile_short,
    bench_compile_long,
    bench_render_highlight
);
criterion_main!(benches);
