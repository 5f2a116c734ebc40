/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use fbshow_core::options::DecoderOptions;
use fbshow_fbdev::BlitOptions;

use crate::cmd_parsers::global_options::CmdOptions;

pub mod global_options;

pub fn get_decoder_options(options: &CmdOptions) -> DecoderOptions {
    DecoderOptions::default()
        .set_max_width(options.max_width)
        .set_max_height(options.max_height)
        .set_strict_mode(options.strict_mode)
}

pub fn get_blit_options(options: &CmdOptions) -> BlitOptions {
    BlitOptions::default()
        .set_redraw_interval(options.redraw_interval)
        .set_legacy_channel_order(options.legacy_channel_order)
}
