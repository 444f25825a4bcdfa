/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Benchmark the core codec operations: batch encoding and unchecked batch
//! decoding of log-uniform sequences, one group entry per registered scheme.

use std::hint::black_box;
use std::mem::size_of;

use codec_bencher::{CODECS, corpus};
use codec_bencher::corpus::BitRange;
use criterion::{Criterion, criterion_group, criterion_main};
use rand::{SeedableRng as _, rngs::StdRng};

/// Small enough for quick iterations, large enough to hide per-call overhead.
const BENCH_LEN: usize = 1 << 16;

fn full_range_corpus() -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(corpus::DEFAULT_SEED);
    corpus::log_uniform(BENCH_LEN, BitRange { min_bits: 0, max_bits: 64 }, &mut rng)
}

fn encode_benchmarks(c: &mut Criterion) {
    let numbers = full_range_corpus();

    let mut group = c.benchmark_group("Encode");
    for codec in CODECS {
        group.bench_function(codec.name(), |b| {
            let mut out = Vec::with_capacity(2 * BENCH_LEN * size_of::<u64>());
            b.iter(|| {
                out.clear();
                black_box(codec.encode(black_box(&numbers), &mut out));
            });
        });
    }
    group.finish();
}

fn decode_benchmarks(c: &mut Criterion) {
    let numbers = full_range_corpus();

    let mut group = c.benchmark_group("Decode");
    for codec in CODECS {
        // Pre-encode once; only the decode is timed.
        let mut encoded = Vec::new();
        codec.encode(&numbers, &mut encoded);

        group.bench_function(codec.name(), |b| {
            let mut decoded = vec![0u64; numbers.len()];
            b.iter(|| {
                // SAFETY: `encoded` was produced by this codec's encoder for
                // exactly `decoded.len()` integers.
                unsafe { codec.decode_unchecked(black_box(&encoded), &mut decoded) };
                black_box(decoded.last().copied());
            });
        });
    }
    group.finish();
}

criterion_group!(codecs, encode_benchmarks, decode_benchmarks);
criterion_main!(codecs);
