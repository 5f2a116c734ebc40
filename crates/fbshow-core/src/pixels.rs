/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Decoded pixels and device pixel layouts
//!
//! Decoders produce a [`PixelBuffer`] of canonical `0xAARRGGBB` values,
//! displays describe where each channel lives inside their own pixel
//! word with a [`ChannelLayout`] and repack the buffer once before drawing.
use alloc::vec;
use alloc::vec::Vec;

/// Alpha bits of a fully opaque canonical pixel
pub const OPAQUE_ALPHA: u32 = 0xFF00_0000;

/// Build a canonical opaque `0xAARRGGBB` pixel
#[inline(always)]
pub const fn argb(r: u8, g: u8, b: u8) -> u32 {
    OPAQUE_ALPHA | (r as u32) << 16 | (g as u32) << 8 | (b as u32)
}

/// Split a canonical pixel into `[a, r, g, b]`
#[inline(always)]
pub const fn split_argb(pixel: u32) -> [u8; 4] {
    pixel.to_be_bytes()
}

/// Where a single color channel lives inside a packed pixel word.
///
/// `offset` is the bit position of the least significant bit of
/// the channel, `length` its width in bits.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ChannelField {
    pub offset: u32,
    pub length: u32
}

impl ChannelField {
    pub const fn new(offset: u32, length: u32) -> ChannelField {
        ChannelField { offset, length }
    }

    /// Whether the field fits inside a 32 bit word
    pub const fn fits_in_word(&self) -> bool {
        self.length <= 32 && self.offset.saturating_add(self.length) <= 32
    }

    /// Bits owned by this channel
    pub fn mask(&self) -> u32 {
        let ones = 1_u64
            .checked_shl(self.length)
            .map_or(u64::MAX, |x| x - 1);

        ones.checked_shl(self.offset).unwrap_or(0) as u32
    }

    /// Scale an 8 bit sample to this channel's width and move
    /// it into place.
    ///
    /// Narrow channels keep the most significant bits, wide channels
    /// replicate the sample into the extra low bits.
    fn place(&self, sample: u8) -> u32 {
        if self.length == 0 {
            return 0;
        }
        let value = if self.length <= 8 {
            u64::from(sample) >> (8 - self.length)
        } else {
            let mut value = u64::from(sample);
            let mut filled = 8;
            while filled < self.length {
                value = (value << 8) | u64::from(sample);
                filled += 8;
            }
            value >> (filled - self.length)
        };

        (value.checked_shl(self.offset).unwrap_or(0) as u32) & self.mask()
    }

    /// Inverse of `place`, returns the 8 bit sample stored in `word`
    fn extract(&self, word: u32) -> u8 {
        if self.length == 0 {
            return 0;
        }
        let value = (word & self.mask()) >> self.offset;

        if self.length <= 8 {
            (value << (8 - self.length)) as u8
        } else {
            (value >> (self.length - 8)) as u8
        }
    }
}

/// Placement of red, green and blue (and optionally transparency)
/// inside a device pixel word.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ChannelLayout {
    pub red:    ChannelField,
    pub green:  ChannelField,
    pub blue:   ChannelField,
    pub transp: ChannelField
}

impl ChannelLayout {
    /// The common 32 bit layout, blue in the lowest byte
    pub const XRGB8888: ChannelLayout = ChannelLayout {
        red:    ChannelField::new(16, 8),
        green:  ChannelField::new(8, 8),
        blue:   ChannelField::new(0, 8),
        transp: ChannelField::new(24, 0)
    };

    /// Fixed ordering used by the first version of the viewer,
    /// green in the lowest byte, then red, then blue.
    ///
    /// Only correct for the display it was tuned on, kept for
    /// devices that misreport their channel fields.
    pub const LEGACY: ChannelLayout = ChannelLayout {
        red:    ChannelField::new(8, 8),
        green:  ChannelField::new(0, 8),
        blue:   ChannelField::new(16, 8),
        transp: ChannelField::new(24, 0)
    };

    /// Whether every channel fits in a 32 bit word and
    /// red, green and blue do not overlap.
    pub fn is_valid(&self) -> bool {
        let fields = [self.red, self.green, self.blue, self.transp];

        if !fields.iter().all(ChannelField::fits_in_word) {
            return false;
        }
        let (r, g, b) = (self.red.mask(), self.green.mask(), self.blue.mask());

        (r & g) == 0 && (r & b) == 0 && (g & b) == 0
    }

    /// Bits not owned by any color channel.
    ///
    /// These are set on every packed pixel so the alpha byte
    /// of 32 bit devices is always fully opaque.
    pub fn opaque_bits(&self) -> u32 {
        !(self.red.mask() | self.green.mask() | self.blue.mask())
    }

    /// Convert a canonical `0xAARRGGBB` pixel into this layout
    #[inline]
    pub fn pack(&self, pixel: u32) -> u32 {
        let [_, r, g, b] = split_argb(pixel);

        self.red.place(r) | self.green.place(g) | self.blue.place(b) | self.opaque_bits()
    }

    /// Recover `[r, g, b]` from a word packed with this layout
    #[inline]
    pub fn unpack(&self, word: u32) -> [u8; 3] {
        [
            self.red.extract(word),
            self.green.extract(word),
            self.blue.extract(word)
        ]
    }
}

/// A decoded image as canonical `0xAARRGGBB` values.
///
/// Rows are stored top to bottom, row 0 is the visually
/// top row of the image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
    width:  usize,
    height: usize,
    pixels: Vec<u32>
}

impl PixelBuffer {
    /// Create a buffer with every pixel set to transparent black
    pub fn new(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer {
            width,
            height,
            pixels: vec![0; width * height]
        }
    }

    /// Wrap existing pixels, returns `None` if `pixels` does not
    /// hold exactly `width*height` values.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Option<PixelBuffer> {
        if width.checked_mul(height)? != pixels.len() {
            return None;
        }
        Some(PixelBuffer {
            width,
            height,
            pixels
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Return row `y`, counted from the top
    pub fn row(&self, y: usize) -> &[u32] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Repack every pixel into `layout`, keeping the row order
    pub fn pack(&self, layout: &ChannelLayout) -> Vec<u32> {
        self.pixels.iter().map(|x| layout.pack(*x)).collect()
    }
}
