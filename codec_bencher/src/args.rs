/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::path::PathBuf;

use clap::Parser;

use codec_bencher::corpus;

#[derive(Parser)]
#[command(version, about)]
pub struct Options {
    /// Path to a test vector file, one unsigned decimal integer per line.
    /// When absent, synthetic log-uniform data is generated instead.
    pub input: Option<PathBuf>,

    /// Number of synthetic integers to generate per distribution.
    #[arg(short, long, default_value_t = corpus::DEFAULT_COUNT)]
    pub count: usize,

    /// Seed for the synthetic data generator.
    #[arg(short, long, default_value_t = corpus::DEFAULT_SEED)]
    pub seed: u64,
}
