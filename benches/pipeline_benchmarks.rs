//! Performance benchmarks for the incremental pipeline.
//!
//! Compares a cold pass (everything rendered) with a warm pass (everything
//! reused) and a pass where one candidate in many changed.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use holdgen::{
    CandidateFacts, GeneratorOptions, IncrementalGenerator, MarkerContract, PipelineConfig,
};
use std::hint::black_box;

fn candidates(count: usize) -> Vec<CandidateFacts> {
    (0..count)
        .map(|i| match i % 3 {
            0 => CandidateFacts::new(format!("Lookup{i}")).with_marker(
                MarkerContract::ResultHolder {
                    ok: "User".into(),
                    err: "String".into(),
                },
            ),
            1 => CandidateFacts::new(format!("Maybe{i}"))
                .with_type_params(["T"])
                .with_marker(MarkerContract::OptionHolder { value: "T".into() }),
            _ => CandidateFacts::new(format!("Id{i}"))
                .with_marker(MarkerContract::ValueObject { inner: "u64".into() }),
        })
        .collect()
}

fn pipeline(parallel: bool) -> IncrementalGenerator {
    IncrementalGenerator::with_default_generators(
        GeneratorOptions::new(),
        PipelineConfig::new().with_parallel(parallel),
    )
}

fn pass_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/passes");

    for count in [10, 100, 1000] {
        let input = candidates(count);

        for parallel in [false, true] {
            let mode = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(
                BenchmarkId::new(format!("cold_{mode}"), count),
                &input,
                |b, input| {
                    b.iter_batched(
                        || pipeline(parallel),
                        |mut pipeline| black_box(pipeline.run_pass(input).map(|r| r.stats)),
                        BatchSize::SmallInput,
                    )
                },
            );

            group.bench_with_input(
                BenchmarkId::new(format!("warm_{mode}"), count),
                &input,
                |b, input| {
                    let mut pipeline = pipeline(parallel);
                    let _ = pipeline.run_pass(input);
                    b.iter(|| black_box(pipeline.run_pass(input).map(|r| r.stats)))
                },
            );
        }

        // One changed candidate among many.
        let mut changed = input.clone();
        changed[0] = CandidateFacts::new("Lookup0").with_marker(MarkerContract::ResultHolder {
            ok: "Account".into(),
            err: "String".into(),
        });
        group.bench_with_input(
            BenchmarkId::new("one_changed", count),
            &(input, changed),
            |b, (input, changed)| {
                let mut pipeline = pipeline(true);
                let mut flip = false;
                b.iter(|| {
                    flip = !flip;
                    let pass = if flip { changed } else { input };
                    black_box(pipeline.run_pass(pass).map(|r| r.stats))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, pass_benchmarks);
criterion_main!(benches);
