/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};

/// Global flags are visible on the innermost subcommand
fn innermost(options: &ArgMatches) -> &ArgMatches {
    let mut current = options;

    while let Some((_, sub)) = current.subcommand() {
        current = sub;
    }
    current
}

fn flag(options: &ArgMatches, id: &str) -> bool {
    options.get_one::<bool>(id).copied().unwrap_or(false)
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let options = innermost(options);

    let log_level = if flag(options, "debug") {
        Level::Debug
    } else if flag(options, "trace") {
        Level::Trace
    } else if flag(options, "warn") {
        Level::Warn
    } else if flag(options, "info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
