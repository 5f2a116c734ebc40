/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BmpCompression {
    RGB,
    RLE8,
    RLE4,
    BITFIELDS,
    Unknown(u32)
}

impl BmpCompression {
    pub fn from_u32(num: u32) -> BmpCompression {
        match num {
            0 => BmpCompression::RGB,
            1 => BmpCompression::RLE8,
            2 => BmpCompression::RLE4,
            3 => BmpCompression::BITFIELDS,
            n => BmpCompression::Unknown(n)
        }
    }
}

/// Fields of the BMP file and information headers
/// needed to locate and interpret the pixel rows.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ImageHeader {
    /// Bytes from the start of the file to the first pixel row
    pub pixel_offset: usize,
    pub width:        usize,
    pub height:       usize,
    /// Bits per pixel, always 24 for a decoded header
    pub depth:        u16,
    pub compression:  BmpCompression,
    /// Rows are stored top to bottom, signalled by a negative height.
    ///
    /// Most files are bottom-up.
    pub top_down:     bool
}
