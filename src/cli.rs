// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("ledgerlens")
        .version(crate_version!())
        .about("Heuristic transaction insights and financial health scoring")
        .arg(
            Arg::new("path")
                .help("Transaction data file (JSON array or CSV)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["json", "csv"])
                .default_value("json")
                .help("Input file format"),
        )
        .arg(
            Arg::new("as-of")
                .long("as-of")
                .value_name("RFC3339")
                .help("Pin the analysis clock instead of using the current time"),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .action(ArgAction::SetTrue)
                .help("Render the report as tables instead of JSON"),
        )
}
