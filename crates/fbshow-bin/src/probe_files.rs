/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use fbshow_bmp::decode_header;
use fbshow_core::options::DecoderOptions;
use fbshow_fbdev::{query_geometry, FramebufferDevice};
use log::warn;

use crate::errors::FbshowErrors;
use crate::serde::{DeviceInfo, Metadata};

/// Extract metadata of an input file and print it to standard output.
pub fn probe_input_file(file: &Path, bytes: &[u8], strict_mode: bool) -> Result<(), FbshowErrors> {
    // only headers are read, so size limits do not matter
    let options = DecoderOptions::default()
        .set_max_width(usize::MAX)
        .set_max_height(usize::MAX)
        .set_strict_mode(strict_mode);

    if !fbshow_bmp::probe_bmp(bytes) {
        warn!("{} does not look like a BMP file", file.display());
    }
    let header = decode_header(bytes, &options)?;
    let metadata = Metadata::new(file, bytes.len() as u64, &header);

    println!("{}", serde_json::to_string_pretty(&metadata)?);

    Ok(())
}

/// Query the geometry of `device` and print it to standard output.
pub fn probe_device<D: FramebufferDevice>(path: &Path, mut device: D) -> Result<(), FbshowErrors> {
    let geometry = query_geometry(&mut device)?;
    let info = DeviceInfo::new(path, &geometry);

    println!("{}", serde_json::to_string_pretty(&info)?);

    Ok(())
}
