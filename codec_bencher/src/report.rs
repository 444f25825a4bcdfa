/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Renders the collected benchmark results as comparison tables on stdout:
//! codecs as rows, distributions as columns.

use comfy_table::{Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::bencher::{BenchmarkResult, TestSuite};

/// Print the full report: encode throughput, decode throughput and
/// compression ratio, one table each.
pub fn print_summary(suites: &[TestSuite]) {
    print_table(suites, "Encode throughput (MB/s)", |result| {
        format!("{:.1}", result.encode_throughput())
    });
    print_table(suites, "Decode throughput (MB/s)", |result| {
        format!("{:.1}", result.decode_throughput())
    });
    print_table(suites, "Encoded size (bytes/integer)", |result| {
        format!("{:.3}", result.bytes_per_integer())
    });
}

fn print_table(suites: &[TestSuite], title: &str, cell: impl Fn(&BenchmarkResult) -> String) {
    let Some(first) = suites.first() else {
        return;
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);

    let mut header = vec!["Codec".to_owned()];
    header.extend(suites.iter().map(|suite| suite.label.clone()));
    table.set_header(header);

    for (row, result) in first.results.iter().enumerate() {
        let mut cells = vec![result.codec.to_owned()];
        cells.extend(suites.iter().map(|suite| cell(&suite.results[row])));
        table.add_row(cells);
    }

    println!("{title}");
    println!("{table}\n");
}
