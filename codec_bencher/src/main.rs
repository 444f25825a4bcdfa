/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use clap::Parser as _;
use codec_bencher::{bencher, corpus, report};
use rand::{SeedableRng as _, rngs::StdRng};

mod args;

fn main() -> std::io::Result<()> {
    let options = args::Options::parse();

    let suites = match &options.input {
        Some(path) => {
            let numbers = corpus::read_test_vector(path)?;
            if numbers.is_empty() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("{} contains no integers", path.display()),
                ));
            }
            println!("Read {} integers from {}.", numbers.len(), path.display());
            vec![bencher::run_suite(path.display().to_string(), &numbers)]
        }
        None => {
            // One RNG for the whole process: every codec within one
            // distribution sees bit-identical input.
            let mut rng = StdRng::seed_from_u64(options.seed);
            let mut suites = Vec::with_capacity(corpus::BIT_RANGES.len());
            for &range in corpus::BIT_RANGES {
                let numbers = corpus::log_uniform(options.count, range, &mut rng);
                println!("Generated {} log-uniform integers ({range}).", numbers.len());
                suites.push(bencher::run_suite(range.to_string(), &numbers));
            }
            suites
        }
    };

    println!();
    report::print_summary(&suites);

    Ok(())
}
