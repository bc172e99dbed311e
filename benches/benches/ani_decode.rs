//! Benchmark suite for ANI stream decoding
//!
//! Measures the LZSS and RLE stages separately and the full block pipeline,
//! to keep an eye on the hot paths of cutscene playback.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use ani_benches::{generate_lzss_literals, generate_lzss_matches, generate_rle1, generate_rle2, sizes};
use ani_types::file::ani::{Header, lzss, rle};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Benchmark the LZSS stage on literal-heavy and match-heavy payloads
fn bench_lzss(c: &mut Criterion) {
	let mut group = c.benchmark_group("lzss_decompress");

	for &size in &[sizes::CUTSCENE, sizes::FULLSCREEN] {
		let payload = generate_lzss_literals(size);
		group.throughput(Throughput::Bytes(size as u64));
		group.bench_with_input(BenchmarkId::new("literals", size), &payload, |b, payload| {
			let mut dst = vec![0u8; size];
			b.iter(|| {
				let written = lzss::decompress(black_box(payload), &mut dst, 0);
				black_box(written)
			});
		});
	}

	let (payload, decoded) = generate_lzss_matches(2048);
	group.throughput(Throughput::Bytes(decoded as u64));
	group.bench_with_input(BenchmarkId::new("matches", decoded), &payload, |b, payload| {
		let mut dst = vec![0u8; decoded];
		b.iter(|| {
			let written = lzss::decompress(black_box(payload), &mut dst, 0);
			black_box(written)
		});
	});

	group.finish();
}

/// Benchmark both differential RLE variants over a persistent raster
fn bench_rle(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_decode");

	for &size in &[sizes::CUTSCENE, sizes::FULLSCREEN] {
		group.throughput(Throughput::Bytes(size as u64));

		let payload = generate_rle1(size);
		group.bench_with_input(BenchmarkId::new("variant1", size), &payload, |b, payload| {
			let mut raster = vec![0u8; size];
			b.iter(|| {
				let cursor = rle::decode_variant1(black_box(payload), &mut raster, 0);
				black_box(cursor)
			});
		});

		let payload = generate_rle2(size);
		group.bench_with_input(BenchmarkId::new("variant2", size), &payload, |b, payload| {
			let mut raster = vec![0u8; size];
			b.iter(|| {
				let cursor = rle::decode_variant2(black_box(payload), &mut raster, 0);
				black_box(cursor)
			});
		});
	}

	group.finish();
}

/// Benchmark header parsing separately
fn bench_header_parsing(c: &mut Criterion) {
	let mut group = c.benchmark_group("ani_header");

	let bytes =
		Header::new(320, 200, 142, 1, ani_types::file::ani::Algorithm::Rle1).unwrap().to_bytes();

	group.bench_function("parse_header", |b| {
		b.iter(|| {
			let result = Header::from_bytes(black_box(&bytes));
			black_box(result)
		});
	});

	group.finish();
}

criterion_group!(benches, bench_lzss, bench_rle, bench_header_parsing);
criterion_main!(benches);
