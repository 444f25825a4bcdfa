/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Supporting types and functions for benchmarking variable-length integer
//! codecs.
//!
//! This crate pits several schemes for packing `u64` sequences into dense
//! byte buffers against each other: the continuation-bit varint from the
//! `varint` crate, the nibble-paired codec from the `nibble_pack` crate, a
//! prefix-length varint, two SQLite-style encodings, and a zstd baseline.
//! Every scheme sits behind the same [`Codec`] ABI and must satisfy the same
//! round-trip law; the driver measures encode/decode throughput and
//! compression ratio across log-uniform distributions of varying width.

pub use bencher::{BenchmarkResult, CodecBencher, TestSuite, run_suite};
pub use codec::{CODECS, Codec, DecodeError};

pub mod bencher;
pub mod codec;
pub mod corpus;
pub mod lesqlite;
pub mod lesqlite2;
pub mod prefix_varint;
pub mod report;
pub mod zstd_baseline;
