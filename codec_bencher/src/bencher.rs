/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The benchmark driver: one timed encode/decode pair per codec and
//! distribution, with a round-trip check in between.

use std::mem::size_of;
use std::time::{Duration, Instant};

use crate::codec::{CODECS, Codec};

/// The measurements for one (codec, distribution) pair. Immutable once
/// created.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub codec: &'static str,
    /// Number of integers in the input sequence.
    pub count: usize,
    /// Raw byte size of the input sequence.
    pub input_bytes: usize,
    /// Byte size of the encoded buffer.
    pub encoded_bytes: usize,
    pub encode_time: Duration,
    pub decode_time: Duration,
}

impl BenchmarkResult {
    /// Raw input bytes consumed per second of encoding, in MB/s.
    pub fn encode_throughput(&self) -> f64 {
        self.input_bytes as f64 / self.encode_time.as_secs_f64() / 1e6
    }

    /// Encoded bytes consumed per second of decoding, in MB/s.
    pub fn decode_throughput(&self) -> f64 {
        self.encoded_bytes as f64 / self.decode_time.as_secs_f64() / 1e6
    }

    /// Average encoded size of one integer, in bytes.
    pub fn bytes_per_integer(&self) -> f64 {
        self.encoded_bytes as f64 / self.count as f64
    }
}

/// The results of running every registered codec against one distribution.
#[derive(Debug, Clone)]
pub struct TestSuite {
    pub label: String,
    pub results: Vec<BenchmarkResult>,
}

/// A helper struct that runs codecs against one input sequence, reusing one
/// scratch buffer and one output buffer across all of them.
pub struct CodecBencher<'a> {
    numbers: &'a [u64],
    scratch: Vec<u8>,
    decoded: Vec<u64>,
}

impl<'a> CodecBencher<'a> {
    pub fn new(numbers: &'a [u64]) -> Self {
        Self {
            numbers,
            // Twice the raw input size: ample for every codec in the
            // registry (the worst case is LEB128 at 10 bytes per integer).
            scratch: Vec::with_capacity(2 * numbers.len() * size_of::<u64>()),
            decoded: vec![0; numbers.len()],
        }
    }

    /// Time one encode and one unchecked decode of the full sequence.
    ///
    /// A round-trip mismatch is a correctness failure, not a performance
    /// data point: it aborts the run with a diagnostic naming the codec and
    /// the distribution rather than recording misleading numbers.
    pub fn run(&mut self, codec: &dyn Codec, distribution: &str) -> BenchmarkResult {
        // Untimed warm-up encode, so first-call effects don't skew the
        // measured run.
        self.scratch.clear();
        codec.encode(self.numbers, &mut self.scratch);

        self.scratch.clear();
        let started = Instant::now();
        let encoded_bytes = codec.encode(self.numbers, &mut self.scratch);
        let encode_time = started.elapsed();

        let started = Instant::now();
        // SAFETY: `scratch` was just produced by this codec's encoder for
        // exactly `decoded.len()` integers.
        unsafe { codec.decode_unchecked(&self.scratch, &mut self.decoded) };
        let decode_time = started.elapsed();

        if let Some(index) = self
            .decoded
            .iter()
            .zip(self.numbers)
            .position(|(decoded, original)| decoded != original)
        {
            panic!(
                "{} failed to round-trip {} at index {}: expected {}, decoded {}",
                codec.name(),
                distribution,
                index,
                self.numbers[index],
                self.decoded[index],
            );
        }

        BenchmarkResult {
            codec: codec.name(),
            count: self.numbers.len(),
            input_bytes: self.numbers.len() * size_of::<u64>(),
            encoded_bytes,
            encode_time,
            decode_time,
        }
    }
}

/// Run every registered codec against one input sequence.
pub fn run_suite(label: String, numbers: &[u64]) -> TestSuite {
    let mut bencher = CodecBencher::new(numbers);
    let results = CODECS
        .iter()
        .map(|codec| bencher.run(*codec, &label))
        .collect();
    TestSuite { label, results }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_covers_every_registered_codec() {
        let numbers: Vec<u64> = (0..1000).map(|i| i * 37).collect();
        let suite = run_suite("smoke".to_owned(), &numbers);

        assert_eq!(suite.results.len(), CODECS.len());
        for result in &suite.results {
            assert_eq!(result.count, numbers.len());
            assert_eq!(result.input_bytes, numbers.len() * size_of::<u64>());
            assert!(result.encoded_bytes > 0);
            assert!(result.bytes_per_integer() > 0.0);
        }
    }
}
