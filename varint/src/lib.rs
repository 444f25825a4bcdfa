/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Variable-length encoding for 64-bit unsigned integers, often shortened to
//! "varint encoding".
//!
//! # Usecase
//!
//! Integer types have a fixed size, known upfront—e.g. a `u64` will always be
//! 8 bytes long, no matter the specific value we're working with.
//! Knowing the size upfront unlocks a variety of processing optimizations, but
//! we're trading speed for memory usage.
//!
//! Varint encoding goes in the opposite direction: it uses a value-dependent
//! number of bytes for each integer.
//! This can have a negative impact on processing speed, but it can greatly
//! reduce the storage requirements if most of the integers you're working with
//! are small in magnitude.
//!
//! # Encoding scheme
//!
//! This crate implements the standard base-128 scheme (LEB128): each integer
//! is represented as a sequence of byte-sized blocks, least significant block
//! first. Every block carries 7 payload bits; the most-significant bit of each
//! block is the **continuation bit**.
//! If the continuation bit is set to 1, another block follows.
//! If the continuation bit is set to 0, the current block is the last block.
//!
//! Values 0–127 take a single byte; a full 64-bit value takes
//! [`MAX_ENCODED_LEN`] (10) bytes.
//!
//! # Example
//!
//! 10 fits in 7 bits, so it is encoded as one block with the continuation bit
//! clear:
//!
//! ```text
//! 0 0001010
//! ^
//! the continuation bit
//! ```
//!
//! 300 needs 9 bits. The low 7 bits go into the first block, with its
//! continuation bit set; the remaining 2 bits go into a second, final block:
//!
//! ```text
//! 1 0101100   0 0000010
//! ^           ^
//! more ahead  last block
//! ```
//!
//! ```
//! let mut buf = Vec::new();
//! varint::write(300, &mut buf).unwrap();
//! assert_eq!(buf, [0xAC, 0x02]);
//!
//! let decoded = varint::read(&mut buf.as_slice()).unwrap();
//! assert_eq!(decoded, 300);
//! ```
//!
//! # Batch operations
//!
//! Whole sequences are encoded back-to-back with no framing other than the
//! continuation bits themselves; decoding must therefore be told how many
//! integers to expect. [`decode_all`] validates every access and reports
//! truncated or malformed buffers as [`std::io::Error`]s, while
//! [`decode_all_unchecked`] reproduces the traditional unchecked decode loop
//! for callers that can guarantee the buffer is well-formed.

use std::io::{Error, ErrorKind, Read, Write};

/// The maximum number of bytes a single `u64` can occupy when varint-encoded:
/// 64 payload bits at 7 bits per block round up to 10 blocks.
pub const MAX_ENCODED_LEN: usize = 10;

/// Encode a single integer in varint format, then write it to the given
/// writer. It returns the number of bytes written.
pub fn write<W>(mut value: u64, writer: &mut W) -> Result<usize, Error>
where
    W: Write,
{
    // Stage the blocks in an auxiliary buffer so the writer sees a single
    // write of the complete encoding.
    let mut buffer = [0u8; MAX_ENCODED_LEN];
    let mut len = 0;
    while value > 0x7f {
        // Extract the 7 least significant bits and set the continuation bit,
        // since higher bits remain.
        buffer[len] = (value as u8) | 0x80;
        len += 1;
        // Then shift right to discard the processed bits.
        value >>= 7;
    }
    // The remaining value fits in 7 bits; the continuation bit stays clear.
    buffer[len] = value as u8;
    len += 1;

    writer.write_all(&buffer[..len])?;
    Ok(len)
}

/// Read a varint-encoded integer from the given reader.
///
/// Fails with [`ErrorKind::UnexpectedEof`] if the reader runs dry before the
/// final block, and with [`ErrorKind::InvalidData`] if the continuation
/// sequence would accumulate more than 64 bits—no encoder produces such a
/// sequence.
pub fn read<R>(reader: &mut R) -> Result<u64, Error>
where
    R: Read,
{
    // Pull bytes one at a time, depending on the value of the continuation
    // bit for the current block.
    let mut buffer = [0u8; 1];
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        reader.read_exact(&mut buffer)?;
        let block = buffer[0];
        if shift >= 63 && block & !1 != 0 {
            // The tenth block may only contribute the single remaining bit,
            // and nothing may follow it.
            return Err(Error::new(
                ErrorKind::InvalidData,
                "varint continuation sequence exceeds 64 bits",
            ));
        }
        value |= ((block & 0x7f) as u64) << shift;
        if block & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

/// The number of bytes [`write`] emits for `value`.
///
/// A value with exactly `k` significant bits encodes to `ceil(max(k, 1) / 7)`
/// bytes.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Encode a whole sequence back-to-back, appending to `out`.
///
/// Returns the number of bytes appended.
pub fn encode_all(input: &[u64], out: &mut Vec<u8>) -> usize {
    let start = out.len();
    for &value in input {
        let mut value = value;
        while value > 0x7f {
            out.push(value as u8 | 0x80);
            value >>= 7;
        }
        out.push(value as u8);
    }
    out.len() - start
}

/// Decode exactly `out.len()` integers from `input`, validating every access.
///
/// Returns the number of bytes consumed. Truncated buffers fail with
/// [`ErrorKind::UnexpectedEof`], dangling continuation sequences with
/// [`ErrorKind::InvalidData`].
pub fn decode_all(input: &[u8], out: &mut [u64]) -> Result<usize, Error> {
    let mut rest = input;
    for slot in out.iter_mut() {
        *slot = read(&mut rest)?;
    }
    Ok(input.len() - rest.len())
}

/// Decode exactly `out.len()` integers from `input` without any bounds
/// checking.
///
/// This is the traditional unchecked varint decode loop: it reads blocks off
/// a raw pointer and never consults `input.len()`.
///
/// # Safety
///
/// `input` must be a buffer produced by [`encode_all`] (or repeated [`write`]
/// calls) for at least `out.len()` integers. A buffer that ends mid-value or
/// carries a dangling continuation sequence makes this read past the end of
/// `input`, which is undefined behavior.
pub unsafe fn decode_all_unchecked(input: &[u8], out: &mut [u64]) {
    let mut p = input.as_ptr();
    for slot in out.iter_mut() {
        // SAFETY: the caller guarantees the buffer holds a complete, well-formed
        // encoding for every slot, so every dereference below stays in bounds.
        let mut block = unsafe { *p };
        p = unsafe { p.add(1) };
        if block < 0x80 {
            // Single-block fast path: the bulk of small-valued workloads.
            *slot = block as u64;
            continue;
        }
        let mut value = (block & 0x7f) as u64;
        let mut shift = 7u32;
        loop {
            block = unsafe { *p };
            p = unsafe { p.add(1) };
            value |= ((block & 0x7f) as u64) << shift;
            if block < 0x80 {
                break;
            }
            shift += 7;
        }
        *slot = value;
    }
}
