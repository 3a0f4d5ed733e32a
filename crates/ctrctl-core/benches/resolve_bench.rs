//! # Resolver Benchmarks
//!
//! Performance benchmarks for capability resolution and status parsing.
//!
//! Run with: `cargo bench -p ctrctl-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ctrctl_core::{
    CAPABILITIES, CapDirective, CapTarget, CapabilityMask, parse_seccomp_mode, parse_status,
    primitives::DEFAULT_CAPABILITIES, resolve,
};
use std::hint::black_box;

/// Alternate add/drop over the whole table, `rounds` times.
fn alternating_directives(rounds: usize) -> Vec<CapDirective> {
    let mut directives = Vec::with_capacity(rounds * CAPABILITIES.len());
    for round in 0..rounds {
        for cap in CAPABILITIES {
            directives.push(if round % 2 == 0 {
                CapDirective::Add(CapTarget::Named(cap))
            } else {
                CapDirective::Drop(CapTarget::Named(cap))
            });
        }
    }
    directives
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let base = CapabilityMask::new(DEFAULT_CAPABILITIES);
    let all = CapabilityMask::known();

    for rounds in [1, 10, 100] {
        let directives = alternating_directives(rounds);
        group.bench_with_input(
            BenchmarkId::from_parameter(directives.len()),
            &directives,
            |b, directives| b.iter(|| resolve(black_box(base), black_box(directives), all)),
        );
    }

    group.finish();
}

fn bench_parse_status(c: &mut Criterion) {
    let text = "Name:\tsh\nState:\tR (running)\nCapInh:\t0000000000000000\n\
CapPrm:\t00000000a80425fb\nCapEff:\t00000000a80425fb\n\
CapBnd:\t00000000a80425fb\nCapAmb:\t0000000000000000\nSeccomp:\t2\n";

    c.bench_function("parse_status", |b| {
        b.iter(|| parse_status(black_box(text)).expect("parse"))
    });
    c.bench_function("parse_seccomp_mode", |b| {
        b.iter(|| parse_seccomp_mode(black_box(text)).expect("parse"))
    });
}

criterion_group!(benches, bench_resolve, bench_parse_status);

criterion_main!(benches);
