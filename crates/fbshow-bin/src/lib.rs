/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

use crate::workflow::create_and_exec_workflow_from_cmd;

mod cmd_args;
mod cmd_parsers;
mod errors;
mod file_io;
mod probe_files;
mod serde;
mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();

    let options = match cmd.try_get_matches() {
        Ok(options) => options,
        // help and version go to stdout and exit cleanly
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            exit(1);
        }
    };

    cmd_parsers::global_options::setup_logger(&options);

    let parsed_opts = cmd_parsers::global_options::parse_options(&options);

    if let Err(reason) = create_and_exec_workflow_from_cmd(&options, &parsed_opts) {
        println!();
        error!(" Could not display image, reason {:?}", reason);
        exit(1);
    }
}
