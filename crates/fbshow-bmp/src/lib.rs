/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A BMP decoder for framebuffer display
//!
//! This crate reads the fixed-offset header of a Windows BMP file and
//! expands its 24 bit BGR rows into a top-down buffer of opaque
//! `0xAARRGGBB` pixels ready to be packed for a display.
//!
//! # Supported formats
//! - Uncompressed (`BI_RGB`) 24 bit images, bottom-up or top-down
//!
//! # Unsupported formats
//! - RLE, bitfields, embedded PNG and JPEGs
//! - Paletted and 1/4/8/16/32 bit images
#![no_std]
#![macro_use]
extern crate alloc;

pub use crate::common::{BmpCompression, ImageHeader};
pub use crate::converter::{convert_bgr24, row_stride};
pub use crate::decoder::{decode_header, probe_bmp, BmpDecoder};
pub use crate::errors::BmpDecoderErrors;

mod common;
mod converter;
mod decoder;
mod errors;
