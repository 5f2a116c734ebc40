/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};

use crate::cmd_args::arg_parsers::parse_dimensions;

pub mod arg_parsers;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MmapOptions {
    No,
    Always,
    Auto
}

impl ValueEnum for MmapOptions {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::No, Self::Auto, Self::Always]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::No => PossibleValue::new("no"),
            Self::Always => PossibleValue::new("always"),
            Self::Auto => PossibleValue::new("auto")
        })
    }
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("fbshow")
        .about("Display a 24 bit BMP image on a Linux framebuffer")
        .arg(Arg::new("in")
            .help("BMP image to display")
            .value_parser(value_parser!(PathBuf))
            .required_unless_present("device-info"))
        .arg(Arg::new("device")
            .long("device")
            .short('d')
            .help("Framebuffer device to draw on")
            .value_parser(value_parser!(PathBuf))
            .default_value("/dev/fb0"))
        .arg(Arg::new("redraw-interval")
            .long("redraw-interval")
            .help("Milliseconds to wait between redraws of the image")
            .value_parser(value_parser!(u64).range(1..))
            .default_value("1000"))
        .arg(Arg::new("once")
            .long("once")
            .action(ArgAction::SetTrue)
            .help("Draw the image a single time, then release the device and exit"))
        .arg(Arg::new("legacy-channel-order")
            .long("legacy-channel-order")
            .action(ArgAction::SetTrue)
            .help("Ignore the channel layout reported by the device")
            .long_help("Pack pixels with green in the low byte, then red, then blue,\ninstead of the red/green/blue offsets the device reports.\nOnly useful for drivers that misreport their layout."))
        .arg(Arg::new("dry-run")
            .long("dry-run")
            .value_name("WxH")
            .help("Render into a simulated WxH device instead of a real one")
            .value_parser(parse_dimensions)
            .conflicts_with("device"))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help("Print image metadata as JSON and exit")
            .conflicts_with_all(["device-info", "once", "dry-run"]))
        .arg(Arg::new("device-info")
            .long("device-info")
            .action(ArgAction::SetTrue)
            .help("Print the framebuffer geometry as JSON and exit"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the image and the device"))
        .arg(Arg::new("mmap")
            .long("mmap")
            .help_heading("ADVANCED")
            .help("Influence the use of memory maps")
            .long_help("Change use of memory maps when reading the image.\nAuto maps files larger than a megabyte and reads smaller ones.")
            .value_parser(value_parser!(MmapOptions))
            .default_value("auto"))
        .arg(Arg::new("lenient")
            .long("lenient")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Accept files that do not start with the BM signature"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum image width accepted by the decoder")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum image height accepted by the decoder")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
}
