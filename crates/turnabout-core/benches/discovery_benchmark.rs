use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use turnabout_core::{ByteRange, Dialect, Document, Engine};

/// A module with `count` copies of a function mixing every rewritable construct
fn synthetic_module(count: usize) -> String {
    let unit = r#"
function handler(req, res) {
    var status, body = `hello ${req.user}!`;
    if (req.method == 'GET') {
        res.send(body)
    } else if (req.method == 'POST') {
        status = 201
    } else {
        status = 405
    }
    ready || (res.end(), log('done'));
    while (queue.length > 0) { queue.shift()() }
    return status ? 'ok' : fail(status)
}
"#;
    unit.repeat(count)
}

fn bench_discovery(c: &mut Criterion) {
    let engine = Engine::default();
    let mut group = c.benchmark_group("discovery");

    for count in [1, 10, 100] {
        let source = synthetic_module(count);
        let doc = Document::parse(source, Dialect::JavaScript).expect("Failed to parse module");
        let offset = doc
            .source()
            .rfind("status = 201")
            .expect("marker missing from module");

        group.bench_with_input(BenchmarkId::new("actions_at", count), &doc, |b, doc| {
            b.iter(|| engine.actions_at(doc, black_box(ByteRange::cursor(offset))))
        });
    }
    group.finish();
}

fn bench_materialize(c: &mut Criterion) {
    let engine = Engine::default();
    let doc = Document::parse(synthetic_module(10), Dialect::JavaScript).expect("Failed to parse module");
    let offset = doc
        .source()
        .rfind("status = 201")
        .expect("marker missing from module");
    let actions = engine.actions_at(&doc, ByteRange::cursor(offset));

    let mut group = c.benchmark_group("materialize");
    for (i, action) in actions.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new(action.title(), i), action, |b, action| {
            b.iter(|| black_box(action.apply()))
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let source = synthetic_module(100);
    c.bench_function("parse_100_functions", |b| {
        b.iter(|| Document::parse(black_box(source.as_str()), Dialect::JavaScript))
    });
}

criterion_group!(benches, bench_discovery, bench_materialize, bench_parse);
criterion_main!(benches);
