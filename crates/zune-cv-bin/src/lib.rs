/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

use crate::workflow::run_command;

mod cmd_args;
mod cmd_parsers;
mod errors;
mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    cmd_parsers::global_options::setup_logger(&options);

    if let Err(err) = run_command(&options) {
        println!();
        error!(" Could not complete command, reason {:?}", err);
        println!();
        exit(-1);
    }
}
