/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The codec ABI every compression scheme under test satisfies, plus the
//! process-wide registry the benchmark driver iterates.

use std::io;

use thiserror::Error;

use crate::lesqlite::LeSqlite;
use crate::lesqlite2::LeSqlite2;
use crate::prefix_varint::PrefixVarint;
use crate::zstd_baseline::ZstdBaseline;

/// Errors reported by the checked decode path.
///
/// The unchecked decode path has no error channel at all: feeding it a buffer
/// that was not produced by the matching encoder is undefined behavior.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The encoded input ended before the expected number of integers was
    /// decoded.
    #[error("encoded input truncated: expected {expected} integers")]
    Truncated { expected: usize },
    /// The encoded input contains a byte sequence no encoder produces.
    #[error("malformed encoded input: {reason}")]
    Malformed { reason: String },
}

/// One interchangeable compression scheme.
///
/// The only contract is the round-trip law: for every input sequence,
/// decoding an encoder's output must reproduce the input exactly. Any scheme
/// can sit behind this boundary, including general-purpose byte compressors
/// used as baselines.
pub trait Codec: Sync {
    /// Human-readable scheme name, used in reports and diagnostics.
    fn name(&self) -> &'static str;

    /// Append the encoded representation of `input` to `out`.
    ///
    /// Returns the number of bytes appended. `out` is a caller-owned scratch
    /// buffer; sizing it to twice the raw byte size of `input` is sufficient
    /// for every codec in [`CODECS`].
    fn encode(&self, input: &[u64], out: &mut Vec<u8>) -> usize;

    /// Decode exactly `out.len()` integers without validating the input.
    ///
    /// This is the path the benchmark times: it preserves the performance
    /// characteristics of a decode loop with no bounds checks.
    ///
    /// # Safety
    ///
    /// `input` must be a buffer produced by this codec's [`Codec::encode`]
    /// for at least `out.len()` integers.
    unsafe fn decode_unchecked(&self, input: &[u8], out: &mut [u64]);

    /// Decode exactly `out.len()` integers, validating every access.
    ///
    /// Returns the number of bytes consumed. Buffers not produced by the
    /// matching encoder fail with a [`DecodeError`] instead of reading out of
    /// bounds; the extra checks make this path slower than
    /// [`Codec::decode_unchecked`].
    fn decode(&self, input: &[u8], out: &mut [u64]) -> Result<usize, DecodeError>;
}

/// The continuation-bit varint codec, backed by the `varint` crate.
pub struct Leb128;

impl Codec for Leb128 {
    fn name(&self) -> &'static str {
        "LEB128"
    }

    fn encode(&self, input: &[u64], out: &mut Vec<u8>) -> usize {
        varint::encode_all(input, out)
    }

    unsafe fn decode_unchecked(&self, input: &[u8], out: &mut [u64]) {
        // SAFETY: forwarded contract, see trait documentation.
        unsafe { varint::decode_all_unchecked(input, out) }
    }

    fn decode(&self, input: &[u8], out: &mut [u64]) -> Result<usize, DecodeError> {
        let expected = out.len();
        varint::decode_all(input, out).map_err(|err| io_decode_error(err, expected))
    }
}

/// The nibble-paired packed varint codec, backed by the `nibble_pack` crate.
pub struct NibblePack;

impl Codec for NibblePack {
    fn name(&self) -> &'static str {
        "NibblePack"
    }

    fn encode(&self, input: &[u64], out: &mut Vec<u8>) -> usize {
        nibble_pack::encode_all(input, out)
    }

    unsafe fn decode_unchecked(&self, input: &[u8], out: &mut [u64]) {
        // SAFETY: forwarded contract, see trait documentation.
        unsafe { nibble_pack::decode_all_unchecked(input, out) }
    }

    fn decode(&self, input: &[u8], out: &mut [u64]) -> Result<usize, DecodeError> {
        let expected = out.len();
        nibble_pack::decode_all(input, out).map_err(|err| io_decode_error(err, expected))
    }
}

/// The fixed, process-wide codec table. Read-only after initialization; the
/// benchmark driver iterates it without compile-time knowledge of the
/// individual schemes.
pub static CODECS: &[&dyn Codec] = &[
    &Leb128,
    &PrefixVarint,
    &LeSqlite,
    &LeSqlite2,
    &NibblePack,
    &ZstdBaseline,
];

/// Translate the io error seam of the codec crates into the [`DecodeError`]
/// taxonomy of the codec ABI.
pub(crate) fn io_decode_error(err: io::Error, expected: usize) -> DecodeError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        DecodeError::Truncated { expected }
    } else {
        DecodeError::Malformed {
            reason: err.to_string(),
        }
    }
}

/// Assemble a little-endian value from `len` raw bytes.
///
/// # Safety
///
/// The caller must guarantee `len` readable bytes at `p`; `len` must not
/// exceed 8.
pub(crate) unsafe fn load_le(p: *const u8, len: usize) -> u64 {
    let mut value = 0u64;
    for i in 0..len {
        value |= (unsafe { *p.add(i) } as u64) << (8 * i);
    }
    value
}

/// Read `len` little-endian bytes from `input` at `pos`, with bounds checks.
pub(crate) fn take_le(
    input: &[u8],
    pos: usize,
    len: usize,
    expected: usize,
) -> Result<u64, DecodeError> {
    let bytes = input
        .get(pos..pos + len)
        .ok_or(DecodeError::Truncated { expected })?;
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().enumerate() {
        value |= (byte as u64) << (8 * i);
    }
    Ok(value)
}
