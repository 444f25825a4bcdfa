/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! A second variant of the SQLite variable-length integer encoding, with an
//! extra 3-byte form between the 2-byte form and the length-prefixed tail.
//!
//! The first byte B0 determines the length:
//!
//! - [0; 178): 1 byte, value = B0.
//! - [178; 242): 2 bytes, the first byte provides 6 high bits.
//! - [242; 250): 3 bytes, the first byte provides 3 high bits.
//! - [250; 255]: B0 - 250 + 3 little-endian payload bytes follow B0
//!   (4-9 bytes total).
//!
//! The 1, 2 and 3-byte forms are bijective: each applies an offset so no
//! value has more than one encoding. The length-prefixed tail is not.

use crate::codec::{Codec, DecodeError, load_le, take_le};

const CUT1: u64 = 178;
const CUT2: u64 = 242;
const CUT3: u64 = 250;

const OFFSET1: u64 = CUT1;
/// 2 bytes encode 14 bits above OFFSET1.
const LIMIT1: u64 = OFFSET1 + (1 << 14);
const OFFSET2: u64 = LIMIT1;
/// 3 bytes encode 19 bits above OFFSET2.
const LIMIT2: u64 = OFFSET2 + (1 << 19);

pub struct LeSqlite2;

/// Encode a whole sequence back-to-back, appending to `out`.
///
/// Returns the number of bytes appended.
pub fn encode_all(input: &[u64], out: &mut Vec<u8>) -> usize {
    let start = out.len();
    for &value in input {
        if value < CUT1 {
            out.push(value as u8);
        } else if value < LIMIT1 {
            let rest = value - OFFSET1;
            out.push((CUT1 + (rest >> 8)) as u8);
            out.push(rest as u8);
        } else if value < LIMIT2 {
            let rest = value - OFFSET2;
            out.push((CUT2 + (rest >> 16)) as u8);
            out.push(rest as u8);
            out.push((rest >> 8) as u8);
        } else {
            let bits = 64 - value.leading_zeros();
            let bytes = ((bits + 7) / 8) as usize;
            out.push((CUT3 as usize + bytes - 3) as u8);
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
            *slot = OFFSET1 + b1 + ((b0 - CUT1) << 8);
            pos += 2;
        } else if b0 < CUT3 {
            let low = take_le(input, pos + 1, 2, expected)?;
            *slot = OFFSET2 + low + ((b0 - CUT2) << 16);
            pos += 3;
        } else {
            let bytes = (b0 - CUT3) as usize + 3;
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
            *slot = OFFSET1 + b1 + ((b0 - CUT1) << 8);
        } else if b0 < CUT3 {
            let low = unsafe { load_le(p, 2) };
            p = unsafe { p.add(2) };
            *slot = OFFSET2 + low + ((b0 - CUT2) << 16);
        } else {
            let bytes = (b0 - CUT3) as usize + 3;
            *slot = unsafe { load_le(p, bytes) };
            p = unsafe { p.add(bytes) };
        }
    }
}

impl Codec for LeSqlite2 {
    fn name(&self) -> &'static str {
        "leSQLite2"
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
