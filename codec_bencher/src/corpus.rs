/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Test corpora for the benchmark driver: synthetic log-uniform sequences,
//! or a pre-existing sequence read from a line-oriented text file.

use std::fmt;
use std::io::{self, BufRead as _, BufReader};
use std::path::Path;

use rand::{Rng as _, rngs::StdRng};

/// The default seed for the synthetic generator. Fixed, so repeated runs see
/// bit-identical input unless `--seed` says otherwise.
pub const DEFAULT_SEED: u64 = 42;

/// The default number of synthetic integers per distribution.
pub const DEFAULT_COUNT: usize = 1_000_000;

/// The bounds of one synthetic distribution: the significant-bit range the
/// generated values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub min_bits: u32,
    pub max_bits: u32,
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} bits", self.min_bits, self.max_bits)
    }
}

/// The distribution set a synthetic benchmark run sweeps: progressively wider
/// significant-bit ranges, up to the full 64 bits.
pub const BIT_RANGES: &[BitRange] = &[
    BitRange { min_bits: 0, max_bits: 8 },
    BitRange { min_bits: 0, max_bits: 16 },
    BitRange { min_bits: 0, max_bits: 32 },
    BitRange { min_bits: 0, max_bits: 48 },
    BitRange { min_bits: 0, max_bits: 64 },
];

/// Generate `count` log-uniform random numbers within `range`.
///
/// The *logarithm* of each value is uniformly distributed between
/// `range.min_bits` and `range.max_bits` significant bits, giving equal
/// probability mass to every octave. A linear-uniform draw would concentrate
/// nearly all values in the widest byte-length class; this distribution
/// stresses every encoded-size class a varint codec has.
pub fn log_uniform(count: usize, range: BitRange, rng: &mut StdRng) -> Vec<u64> {
    debug_assert!(range.min_bits < range.max_bits && range.max_bits <= 64);
    let lo = range.min_bits as f64 * std::f64::consts::LN_2;
    let hi = range.max_bits as f64 * std::f64::consts::LN_2;
    (0..count)
        .map(|_| rng.random_range(lo..hi).exp() as u64)
        .collect()
}

/// Read a test vector from a file.
///
/// Format: one unsigned decimal number per line. Lines that don't parse are
/// skipped; I/O errors are the caller's problem.
pub fn read_test_vector(path: &Path) -> io::Result<Vec<u64>> {
    let file = fs_err::File::open(path)?;
    let mut numbers = Vec::new();
    for line in BufReader::new(file).lines() {
        if let Ok(value) = line?.trim().parse::<u64>() {
            numbers.push(value);
        }
    }
    Ok(numbers)
}
