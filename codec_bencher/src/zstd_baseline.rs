/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! A general-purpose byte compressor behind the codec ABI, as a baseline for
//! the integer-aware schemes: the input's little-endian byte image run
//! through zstd at its fastest level.
//!
//! The baseline always validates its frames, so there is no separate
//! unchecked fast path; `decode_unchecked` delegates to the checked decoder.

use std::mem::size_of;

use crate::codec::{Codec, DecodeError};

/// Compression level 1: the speed end of zstd's range, the fair comparison
/// point for throughput-oriented integer codecs.
const LEVEL: i32 = 1;

pub struct ZstdBaseline;

impl Codec for ZstdBaseline {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn encode(&self, input: &[u64], out: &mut Vec<u8>) -> usize {
        let mut raw = Vec::with_capacity(input.len() * size_of::<u64>());
        for &value in input {
            raw.extend_from_slice(&value.to_le_bytes());
        }
        match zstd::bulk::compress(&raw, LEVEL) {
            Ok(compressed) => {
                out.extend_from_slice(&compressed);
                compressed.len()
            }
            // In-memory compression of a well-formed buffer does not fail;
            // anything else is unrecoverable.
            Err(err) => panic!("zstd compression failed: {err}"),
        }
    }

    unsafe fn decode_unchecked(&self, input: &[u8], out: &mut [u64]) {
        if let Err(err) = self.decode(input, out) {
            panic!("zstd baseline fed a buffer it did not produce: {err}");
        }
    }

    fn decode(&self, input: &[u8], out: &mut [u64]) -> Result<usize, DecodeError> {
        let expected = out.len();
        let raw_len = expected * size_of::<u64>();
        let raw = zstd::bulk::decompress(input, raw_len)
            .map_err(|err| crate::codec::io_decode_error(err, expected))?;
        if raw.len() != raw_len {
            return Err(DecodeError::Truncated { expected });
        }
        for (i, slot) in out.iter_mut().enumerate() {
            let mut bytes = [0u8; size_of::<u64>()];
            bytes.copy_from_slice(&raw[i * size_of::<u64>()..(i + 1) * size_of::<u64>()]);
            *slot = u64::from_le_bytes(bytes);
        }
        Ok(input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let values = [0u64, 1, 127, 128, 16384, u32::MAX as u64, u64::MAX];
        let mut buf = Vec::new();
        let written = ZstdBaseline.encode(&values, &mut buf);
        assert_eq!(written, buf.len());

        let mut decoded = [0u64; 7];
        let consumed = ZstdBaseline.decode(&buf, &mut decoded).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(decoded, values);
    }

    #[test]
    fn garbage_is_rejected() {
        let mut decoded = [0u64; 4];
        assert!(ZstdBaseline.decode(&[1, 2, 3, 4, 5], &mut decoded).is_err());
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let values = [u64::MAX; 32];
        let mut buf = Vec::new();
        ZstdBaseline.encode(&values, &mut buf);

        let mut decoded = [0u64; 32];
        assert!(
            ZstdBaseline
                .decode(&buf[..buf.len() - 1], &mut decoded)
                .is_err()
        );
    }
}
