use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use escompat_core::analysis::AnalysisEngine;
use escompat_core::database::CompatTable;
use escompat_core::features::FeatureRegistry;
use escompat_core::parser::ParsedFile;
use escompat_core::visitor::detect_features;

fn generate_500_loc_module() -> String {
    let mut code = String::with_capacity(20000);
    code.push_str("// Generated module for benchmarking\n\n");

    for i in 0..25 {
        code.push_str(&format!(
            r#"class Entity{i} {{
    static #count = 0;
    label = `entity-{i}`;

    constructor({{ id, name = "unnamed", ...rest }}) {{
        this.id = id;
        this.name = name;
        this.rest = rest;
    }}

    get [Symbol.toStringTag]() {{
        return this.label;
    }}
}}

const load{i} = async (id) => {{
    const response = await fetch(`/api/entities/{i}/${{id}}`);
    return response?.ok ? response.json() : null;
}};

export function* ids{i}(items) {{
    for (const item of items) {{
        yield item.id ?? 0;
    }}
}}

"#,
            i = i
        ));
    }

    code
}

fn generate_files(count: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|i| {
            let filename = format!("file_{}.js", i);
            let content = format!(
                r#"const defaults{i} = {{ size: 2 ** {i}, tags: [] }};

export const build{i} = (options = {{}}) => ({{
    ...defaults{i},
    ...options,
    render() {{
        return `item-{i}`;
    }},
}});
"#,
                i = i
            );
            (filename, content)
        })
        .collect()
}

fn engine() -> AnalysisEngine {
    let table = CompatTable::bundled().expect("bundled table");
    AnalysisEngine::new(FeatureRegistry::with_defaults(), Box::new(table), &["ie11", "chrome60"])
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let code = generate_500_loc_module();
    let lines = code.lines().count();

    group.throughput(Throughput::Elements(lines as u64));
    group.bench_function("parse_500_loc", |b| {
        b.iter(|| ParsedFile::from_source(black_box("benchmark.js"), black_box(&code)))
    });

    group.finish();
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");

    let registry = FeatureRegistry::with_defaults();
    let code = generate_500_loc_module();
    let file = ParsedFile::from_source("large.js", &code);

    group.bench_function("detect_500_loc", |b| {
        b.iter(|| detect_features(black_box(&file), &registry))
    });

    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    let engine = engine();
    let code = generate_500_loc_module();
    let file = ParsedFile::from_source("large.js", &code);

    group.bench_function("analyze_500_loc", |b| {
        b.iter(|| engine.analyze(black_box(&file)))
    });

    for size in [10, 50, 100] {
        let files: Vec<ParsedFile> = generate_files(size)
            .iter()
            .map(|(name, content)| ParsedFile::from_source(name, content))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("project_size", size), &files, |b, files| {
            b.iter(|| {
                for file in files {
                    let _ = engine.analyze(black_box(file));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_detection, bench_analysis);
criterion_main!(benches);
