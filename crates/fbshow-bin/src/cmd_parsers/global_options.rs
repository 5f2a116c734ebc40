/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;
use std::time::Duration;

use clap::ArgMatches;
use log::{info, Level};

use crate::cmd_args::MmapOptions;

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub input:                Option<PathBuf>,
    pub device:               PathBuf,
    pub mmap:                 MmapOptions,
    pub max_width:            usize,
    pub max_height:           usize,
    pub strict_mode:          bool,
    pub redraw_interval:      Duration,
    pub legacy_channel_order: bool,
    pub once:                 bool,
    pub dry_run:              Option<(usize, usize)>,
    pub probe:                bool,
    pub device_info:          bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            input:                None,
            device:               PathBuf::from("/dev/fb0"),
            mmap:                 MmapOptions::Auto,
            max_width:            1 << 14,
            max_height:           1 << 14,
            strict_mode:          true,
            redraw_interval:      Duration::from_millis(1000),
            legacy_channel_order: false,
            once:                 false,
            dry_run:              None,
            probe:                false,
            device_info:          false
        }
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    cmd_options.input = options.get_one::<PathBuf>("in").cloned();

    if let Some(device) = options.get_one::<PathBuf>("device") {
        cmd_options.device = device.clone();
    }
    if let Some(mmap) = options.get_one::<MmapOptions>("mmap") {
        info!("Setting mmap to be {:?}", mmap);
        cmd_options.mmap = *mmap;
    }
    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.max_height = *height;
    }
    if let Some(interval) = options.get_one::<u64>("redraw-interval") {
        cmd_options.redraw_interval = Duration::from_millis(*interval);
    }
    if options.get_flag("lenient") {
        info!("Accepting files without a BM signature");
        cmd_options.strict_mode = false;
    }
    if options.get_flag("legacy-channel-order") {
        info!("Using the legacy channel order");
        cmd_options.legacy_channel_order = true;
    }
    cmd_options.dry_run = options.get_one::<(usize, usize)>("dry-run").copied();
    cmd_options.once = options.get_flag("once");
    cmd_options.probe = options.get_flag("probe");
    cmd_options.device_info = options.get_flag("device-info");

    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use crate::cmd_args::create_cmd_args;
    use crate::cmd_parsers::global_options::parse_options;
    use crate::cmd_parsers::{get_blit_options, get_decoder_options};

    #[test]
    fn flags_reach_the_options() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "fbshow",
                "cat.bmp",
                "--lenient",
                "--legacy-channel-order",
                "--redraw-interval",
                "250",
                "--dry-run",
                "8x6",
                "--max-width",
                "100"
            ])
            .unwrap();
        let options = parse_options(&matches);

        assert_eq!(options.input, Some(PathBuf::from("cat.bmp")));
        assert_eq!(options.dry_run, Some((8, 6)));
        assert!(!options.once);

        let decoder = get_decoder_options(&options);
        assert!(!decoder.strict_mode());
        assert_eq!(decoder.max_width(), 100);

        let blit = get_blit_options(&options);
        assert!(blit.legacy_channel_order());
        assert_eq!(blit.redraw_interval(), Duration::from_millis(250));
    }
}
