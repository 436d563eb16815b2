//! Benchmarks for the package container codec and fingerprint.
//!
//! Measures archive assembly, opening, and fingerprint computation across
//! payload sizes from small config-only packages up to module-carrying
//! ones.
//!
//! Run with: cargo bench --package hangar-archive

#![allow(clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hangar_archive::archive::{self, PayloadFile};
use hangar_archive::fingerprint;
use hangar_archive::manifest::{ContentItem, Manifest};
use hangar_core::{Fqn, PluginKind, Version};
use std::hint::black_box;

const PAYLOAD_SIZES: [usize; 3] = [1_024, 65_536, 1_048_576];

fn module_manifest() -> Manifest {
    let mut manifest = Manifest::new(
        "Bench Connector",
        "bench.connectors.demo",
        "1.0.0",
        PluginKind::Connector,
    );
    manifest
        .content_items
        .push(ContentItem::new("module", "bin/module.bin"));
    manifest
}

/// Compressible but non-constant filler bytes.
fn filler(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn bench_assemble(c: &mut Criterion) {
    let manifest = module_manifest();
    let mut group = c.benchmark_group("archive_assemble");

    for size in PAYLOAD_SIZES {
        let payload = vec![PayloadFile::new("bin/module.bin", filler(size))];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| archive::assemble(black_box(&manifest), black_box(payload)));
        });
    }

    group.finish();
}

fn bench_open(c: &mut Criterion) {
    let manifest = module_manifest();
    let mut group = c.benchmark_group("archive_open");

    for size in PAYLOAD_SIZES {
        let payload = vec![PayloadFile::new("bin/module.bin", filler(size))];
        let assembled = archive::assemble(&manifest, &payload)
            .into_value()
            .expect("assembled archive");
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &assembled, |b, bytes| {
            b.iter(|| archive::open(black_box(bytes)));
        });
    }

    group.finish();
}

fn bench_fingerprint_compute(c: &mut Criterion) {
    let fqn = Fqn::new("bench.connectors.demo");
    let version = Version::new("1.0.0");
    let mut group = c.benchmark_group("fingerprint_compute");

    for size in PAYLOAD_SIZES {
        let payload = filler(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| {
                fingerprint::compute(black_box(payload), black_box(&fqn), black_box(&version))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_assemble,
    bench_open,
    bench_fingerprint_compute
);
criterion_main!(benches);
