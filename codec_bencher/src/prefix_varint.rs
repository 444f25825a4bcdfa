/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! A prefix-length varint: instead of spreading continuation bits across all
//! bytes, the count of trailing zero bits in the *first* byte announces the
//! total encoded length upfront, so the decoder branches once per integer.
//!
//! A value with `bits = 64 - clz(x | 1)` significant bits and `bits <= 56` is
//! encoded as the little-endian bytes of `(2x + 1) << (bytes - 1)` where
//! `bytes = 1 + (bits - 1) / 7`. Values wider than 56 bits get a `0x00`
//! marker byte followed by the full 8-byte little-endian value, 9 bytes
//! total — the maximum.

use crate::codec::{Codec, DecodeError, load_le, take_le};

/// The maximum encoded length of one integer: a marker byte plus 8 payload
/// bytes.
pub const MAX_ENCODED_LEN: usize = 9;

pub struct PrefixVarint;

/// Encode a whole sequence back-to-back, appending to `out`.
///
/// Returns the number of bytes appended.
pub fn encode_all(input: &[u64], out: &mut Vec<u8>) -> usize {
    let start = out.len();
    for &value in input {
        let bits = 64 - (value | 1).leading_zeros();
        if bits > 56 {
            out.push(0);
            out.extend_from_slice(&value.to_le_bytes());
        } else {
            let bytes = 1 + (bits as usize - 1) / 7;
            let tagged = (2 * value + 1) << (bytes - 1);
            out.extend_from_slice(&tagged.to_le_bytes()[..bytes]);
        }
    }
    out.len() - start
}

/// Decode exactly `out.len()` integers from `input`, validating every access.
///
/// Returns the number of bytes consumed.
pub fn decode_all(input: &[u8], out: &mut [u64]) -> Result<usize, DecodeError> {
    let expected = out.len();
    let mut pos = 0;
    for slot in out.iter_mut() {
        let b0 = *input
            .get(pos)
            .ok_or(DecodeError::Truncated { expected })?;
        if b0 & 1 != 0 {
            *slot = (b0 >> 1) as u64;
            pos += 1;
            continue;
        }
        let length = encoded_length(b0);
        if length < 9 {
            let raw = take_le(input, pos, length, expected)?;
            *slot = raw >> length;
        } else {
            *slot = take_le(input, pos + 1, 8, expected)?;
        }
        pos += length;
    }
    Ok(pos)
}

/// Decode exactly `out.len()` integers from `input` without any bounds
/// checking.
///
/// # Safety
///
/// `input` must be a buffer produced by [`encode_all`] for at least
/// `out.len()` integers.
pub unsafe fn decode_all_unchecked(input: &[u8], out: &mut [u64]) {
    let mut p = input.as_ptr();
    for slot in out.iter_mut() {
        // SAFETY: the caller guarantees a complete encoding at `p`.
        let b0 = unsafe { *p };
        if b0 & 1 != 0 {
            *slot = (b0 >> 1) as u64;
            p = unsafe { p.add(1) };
            continue;
        }
        let length = encoded_length(b0);
        if length < 9 {
            *slot = unsafe { load_le(p, length) } >> length;
        } else {
            *slot = unsafe { load_le(p.add(1), 8) };
        }
        p = unsafe { p.add(length) };
    }
}

// The total encoded length announced by the first byte: one more than its
// count of trailing zero bits, 9 when the byte is the 0x00 marker.
#[inline]
fn encoded_length(b0: u8) -> usize {
    1 + (b0 as u32 | 0x100).trailing_zeros() as usize
}

impl Codec for PrefixVarint {
    fn name(&self) -> &'static str {
        "PrefixVarint"
    }

    fn encode(&self, input: &[u64], out: &mut Vec<u8>) -> usize {
        encode_all(input, out)
    }

    unsafe fn decode_unchecked(&self, input: &[u8], out: &mut [u64]) {
        // SAFETY: forwarded contract, see trait documentation.
        unsafe { decode_all_unchecked(input, out) }
    }

    fn decode(&self, input: &[u8], out: &mut [u64]) -> Result<usize, DecodeError> {
        decode_all(input, out)
    }
}
