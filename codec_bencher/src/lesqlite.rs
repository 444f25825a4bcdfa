/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! A variant of the SQLite variable-length integer encoding, little-endian
//! flavored.
//!
//! The first byte B0 determines the length:
//!
//! - 0-184: 1 byte, value = B0.
//! - 185-248: 2 bytes, value = 185 + B1 + 256 * (B0 - 185).
//! - 249-255: B0 - 249 + 2 little-endian payload bytes follow B0
//!   (3-9 bytes total).

use crate::codec::{Codec, DecodeError, load_le, take_le};

const CUT1: u64 = 185;
const CUT2: u64 = 249;
/// The largest value the 2-byte form can carry.
const TWO_BYTE_MAX: u64 = CUT1 + 255 + 256 * (CUT2 - 1 - CUT1);

pub struct LeSqlite;

/// Encode a whole sequence back-to-back, appending to `out`.
///
/// Returns the number of bytes appended.
pub fn encode_all(input: &[u64], out: &mut Vec<u8>) -> usize {
    let start = out.len();
    for &value in input {
        if value < CUT1 {
            out.push(value as u8);
        } else if value <= TWO_BYTE_MAX {
            let rest = value - CUT1;
            out.push((CUT1 + (rest >> 8)) as u8);
            out.push(rest as u8);
        } else {
            let bits = 64 - value.leading_zeros();
            let bytes = ((bits + 7) / 8) as usize;
            out.push((CUT2 as usize + bytes - 2) as u8);
            out.extend_from_slice(&value.to_le_bytes()[..bytes]);
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
            .ok_or(DecodeError::Truncated { expected })? as u64;
        if b0 < CUT1 {
            *slot = b0;
            pos += 1;
        } else if b0 < CUT2 {
            let b1 = *input
                .get(pos + 1)
                .ok_or(DecodeError::Truncated { expected })? as u64;
            *slot = CUT1 + b1 + ((b0 - CUT1) << 8);
            pos += 2;
        } else {
            let bytes = (b0 - CUT2) as usize + 2;
            *slot = take_le(input, pos + 1, bytes, expected)?;
            pos += 1 + bytes;
        }
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
        let b0 = unsafe { *p } as u64;
        p = unsafe { p.add(1) };
        if b0 < CUT1 {
            *slot = b0;
        } else if b0 < CUT2 {
            let b1 = unsafe { *p } as u64;
            p = unsafe { p.add(1) };
            *slot = CUT1 + b1 + ((b0 - CUT1) << 8);
        } else {
            let bytes = (b0 - CUT2) as usize + 2;
            *slot = unsafe { load_le(p, bytes) };
            p = unsafe { p.add(bytes) };
        }
    }
}

impl Codec for LeSqlite {
    fn name(&self) -> &'static str {
        "leSQLite"
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
