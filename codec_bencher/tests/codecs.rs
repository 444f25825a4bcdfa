/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Cross-codec properties: every scheme in the registry must satisfy the
//! round-trip law on the same inputs, through both decode paths.

use codec_bencher::corpus::{self, BitRange};
use codec_bencher::{CODECS, Codec, DecodeError, codec};
use rand::{SeedableRng as _, rngs::StdRng};

/// The values at the edges of the representable range and of the common
/// encoded-size classes.
const BOUNDARY_VALUES: &[u64] = &[
    0,
    1,
    127,
    128,
    255,
    256,
    16383,
    16384,
    (1 << 32) - 1,
    1 << 32,
    (1 << 56) - 1,
    1 << 56,
    u64::MAX,
];

/// Encode, then decode through both paths, asserting the round-trip law.
fn assert_roundtrip(codec: &dyn Codec, input: &[u64]) {
    let mut encoded = Vec::new();
    let written = codec.encode(input, &mut encoded);
    assert_eq!(written, encoded.len(), "{}: reported byte count", codec.name());

    let mut checked = vec![0u64; input.len()];
    codec
        .decode(&encoded, &mut checked)
        .unwrap_or_else(|err| panic!("{}: checked decode failed: {err}", codec.name()));
    assert_eq!(checked, input, "{}: checked round-trip", codec.name());

    let mut unchecked = vec![0u64; input.len()];
    // SAFETY: `encoded` was produced by this codec's encoder for exactly
    // `input.len()` integers.
    unsafe { codec.decode_unchecked(&encoded, &mut unchecked) };
    assert_eq!(unchecked, input, "{}: unchecked round-trip", codec.name());
}

#[test]
fn boundary_values_roundtrip_through_every_codec() {
    for codec in CODECS {
        assert_roundtrip(*codec, BOUNDARY_VALUES);
    }
}

#[test]
fn every_bit_length_bucket_roundtrips() {
    let mut rng = StdRng::seed_from_u64(corpus::DEFAULT_SEED);
    for bucket in 1..=64 {
        let range = BitRange { min_bits: bucket - 1, max_bits: bucket };
        let numbers = corpus::log_uniform(64, range, &mut rng);
        for codec in CODECS {
            assert_roundtrip(*codec, &numbers);
        }
    }
}

#[test]
fn odd_and_tiny_sequences_roundtrip() {
    for codec in CODECS {
        assert_roundtrip(*codec, &[]);
        assert_roundtrip(*codec, &[42]);
        assert_roundtrip(*codec, &[0, u64::MAX, 300]);
        assert_roundtrip(*codec, &[1, 2, 3, 4, 5]);
    }
}

#[test]
fn encoding_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(corpus::DEFAULT_SEED);
    let numbers = corpus::log_uniform(4096, BitRange { min_bits: 0, max_bits: 64 }, &mut rng);

    for codec in CODECS {
        let mut first = Vec::new();
        codec.encode(&numbers, &mut first);
        let mut second = Vec::new();
        codec.encode(&numbers, &mut second);
        assert_eq!(first, second, "{}: repeated encoding differs", codec.name());
    }
}

#[test]
fn continuation_bit_scenario() {
    // The canonical wire-format check for the continuation-bit codec.
    let input = [0u64, 1, 127, 128, 16384];
    let mut encoded = Vec::new();
    codec::Leb128.encode(&input, &mut encoded);
    assert_eq!(encoded, [0x00, 0x01, 0x7F, 0x80, 0x01, 0x80, 0x80, 0x01]);

    let mut decoded = [0u64; 5];
    codec::Leb128.decode(&encoded, &mut decoded).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn truncated_buffers_fail_the_checked_decode() {
    for codec in CODECS {
        let mut encoded = Vec::new();
        codec.encode(BOUNDARY_VALUES, &mut encoded);

        let mut decoded = vec![0u64; BOUNDARY_VALUES.len()];
        let result = codec.decode(&encoded[..encoded.len() - 1], &mut decoded);
        assert!(
            result.is_err(),
            "{}: decoding a truncated buffer succeeded",
            codec.name()
        );
    }
}

#[test]
fn dangling_continuation_is_malformed() {
    // Eleven continuation bytes exceed the 10-byte limit of a 64-bit varint.
    let mut decoded = [0u64; 1];
    let err = codec::Leb128.decode(&[0x80; 11], &mut decoded).unwrap_err();
    assert!(matches!(err, DecodeError::Malformed { .. }), "got {err:?}");
}

#[test]
fn truncation_reports_the_expected_count() {
    let mut decoded = [0u64; 3];
    let err = codec::Leb128.decode(&[0x01, 0x80], &mut decoded).unwrap_err();
    assert_eq!(err, DecodeError::Truncated { expected: 3 });
}
