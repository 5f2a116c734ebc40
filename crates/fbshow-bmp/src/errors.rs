/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use fbshow_core::bytestream::ByteIoError;

use crate::common::BmpCompression;

/// BMP errors that can occur during decoding
#[non_exhaustive]
pub enum BmpDecoderErrors {
    /// The file/bytes do not start with `BM`
    InvalidMagicBytes,
    /// The buffer is too small, expected at least
    /// a size but got another size
    TooSmallBuffer(usize, usize),
    /// Bits per pixel other than 24
    UnsupportedDepth(u16),
    /// Anything but uncompressed storage
    UnsupportedCompression(BmpCompression),
    /// Generic message
    GenericStatic(&'static str),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// A calculation overflowed
    OverFlowOccurred,
    IoErrors(ByteIoError)
}

impl Debug for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, file does not start with BM")
            }
            Self::TooSmallBuffer(expected, found) => {
                writeln!(
                    f,
                    "Too small of buffer, expected {} but found {}",
                    expected, found
                )
            }
            Self::UnsupportedDepth(depth) => {
                writeln!(f, "Image must be 24 bits per pixel, found {depth}")
            }
            Self::UnsupportedCompression(compression) => {
                writeln!(f, "Unsupported BMP compression scheme {compression:?}")
            }
            Self::GenericStatic(header) => {
                writeln!(f, "{}", header)
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::OverFlowOccurred => {
                writeln!(f, "Overflow occurred")
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl Display for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl From<ByteIoError> for BmpDecoderErrors {
    fn from(value: ByteIoError) -> Self {
        BmpDecoderErrors::IoErrors(value)
    }
}
