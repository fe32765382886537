use criterion::{criterion_group, criterion_main, Criterion};
use js_deobfuscator::powershell::scrape;
use js_deobfuscator::{Deobfuscator, EngineConfig};
use std::hint::black_box;
use std::time::Duration;

// Inputs shaped to stress the scanners: long token runs, many candidates,
// unterminated PowerShell heads.
fn get_pathological_corpus() -> Vec<String> {
    vec![
        "_0x".repeat(20000),
        (0..5000).map(|i| format!("var _0x{:04x} = {};", i, i * 7)).collect(),
        (0..5000).map(|i| format!("a{}.b{}(", i, i)).collect(),
        format!("powershell -{}", "a".repeat(50000)),
        "powershell -c \"".repeat(5000),
        format!("{}{}", "9".repeat(40000), "x"),
        "function ".repeat(10000),
        "var x = document.getElementById('x'); x.innerHTML = 'ok';".to_string(),
    ]
}

fn benchmark_transform(c: &mut Criterion) {
    let deobfuscator = Deobfuscator::new(&EngineConfig::default());
    let corpus = get_pathological_corpus();

    let mut group = c.benchmark_group("transform");
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(10);

    for (i, input) in corpus.iter().enumerate() {
        group.bench_function(format!("corpus_{}", i), |b| {
            b.iter(|| deobfuscator.transform(black_box(input)))
        });
    }
    group.finish();
}

fn benchmark_scrape(c: &mut Criterion) {
    let corpus = get_pathological_corpus();
    let mut group = c.benchmark_group("powershell_scrape");
    group.sample_size(10);

    for (i, input) in corpus.iter().enumerate() {
        group.bench_function(format!("corpus_{}", i), |b| b.iter(|| scrape(black_box(input))));
    }
    group.finish();
}

criterion_group!(benches, benchmark_transform, benchmark_scrape);
criterion_main!(benches);
