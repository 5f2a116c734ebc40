/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// WINDOWS BMP, AS MUCH OF IT AS WE READ
// -------------------------------------
// A 14 byte file header: the magic number ("BM"), file size, two reserved
// words and the offset to the pixel data.
//
// Then the info header. Every Windows variant from v3 on starts with the
// same 40 byte layout, and only the first 20 bytes of it matter here:
// header size, width, height (negative for top-down files), color planes,
// bits per pixel and the compression method.
//
// Pixel rows follow at the data offset, each padded to a multiple of four
// bytes. Rows are stored bottom-up unless the height is negative.
//
//  offset  size  field
//  0       2     signature "BM"
//  2       4     file size
//  6       4     reserved
//  10      4     pixel data offset
//  14      4     info header size
//  18      4     width
//  22      4     height (signed)
//  26      2     planes
//  28      2     bits per pixel
//  30      4     compression
use alloc::vec;

use fbshow_core::bytestream::ByteReader;
use fbshow_core::options::DecoderOptions;
use fbshow_core::pixels::PixelBuffer;
use log::{trace, warn};

use crate::common::{BmpCompression, ImageHeader};
use crate::converter::convert_bgr24;
use crate::BmpDecoderErrors;

/// Bytes needed to read every header field we use,
/// the last one being compression at offset 30.
pub(crate) const MIN_HEADER_SIZE: usize = 34;

/// The only depth we can display
const SUPPORTED_DEPTH: u16 = 24;

/// Probe some bytes to see
/// if they consist of a BMP image
pub fn probe_bmp(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        if magic_bytes == b"BM" {
            // skip file_size   -> 4
            // skip reserved    -> 4
            // skip data offset -> 4
            // read sz
            if let Some(sz) = bytes.get(14) {
                let sz = *sz;

                return sz == 12
                    || sz == 16
                    || sz == 40
                    || sz == 52
                    || sz == 56
                    || sz == 64
                    || sz == 108
                    || sz == 124;
            }
        }
    }
    false
}

/// Read the header fields of a BMP file
///
/// No pixel bytes are touched, an unsupported depth or compression
/// is reported before the pixel data offset is even looked at.
pub fn decode_header(bytes: &[u8], options: &DecoderOptions) -> Result<ImageHeader, BmpDecoderErrors> {
    if bytes.len() < MIN_HEADER_SIZE {
        return Err(BmpDecoderErrors::TooSmallBuffer(
            MIN_HEADER_SIZE,
            bytes.len()
        ));
    }
    let mut reader = ByteReader::new(bytes);

    if reader.read_fixed_bytes_or_error::<2>()? != *b"BM" {
        if options.strict_mode() {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }
        warn!("File does not start with BM, decoding anyway");
    }
    // 4 bytes file size
    // skip 4 reserved bytes
    reader.skip(8)?;

    let pixel_offset = reader.get_u32_le_err()?;
    // info header size, we only read the fields common to all of them
    reader.skip(4)?;

    let width = reader.get_u32_le_err()?;
    let height = reader.get_i32_le_err()?;
    // planes
    reader.skip(2)?;

    let depth = reader.get_u16_le_err()?;
    let compression = BmpCompression::from_u32(reader.get_u32_le_err()?);

    trace!("Width: {}", width);
    trace!("Height: {}", height);
    trace!("Bit depth: {}", depth);
    trace!("Compression  : {:?}", compression);
    trace!("Pixel offset: {}", pixel_offset);

    if depth != SUPPORTED_DEPTH {
        return Err(BmpDecoderErrors::UnsupportedDepth(depth));
    }
    if compression != BmpCompression::RGB {
        return Err(BmpDecoderErrors::UnsupportedCompression(compression));
    }

    let top_down = height < 0;
    let height = height.unsigned_abs() as usize;
    let width = width as usize;

    if width == 0 {
        return Err(BmpDecoderErrors::GenericStatic(
            "Width is zero, invalid image"
        ));
    }
    if height == 0 {
        return Err(BmpDecoderErrors::GenericStatic(
            "Height is zero, invalid image"
        ));
    }
    if width > options.max_width() {
        return Err(BmpDecoderErrors::TooLargeDimensions(
            "width",
            options.max_width(),
            width
        ));
    }
    if height > options.max_height() {
        return Err(BmpDecoderErrors::TooLargeDimensions(
            "height",
            options.max_height(),
            height
        ));
    }

    Ok(ImageHeader {
        pixel_offset: pixel_offset as usize,
        width,
        height,
        depth,
        compression,
        top_down
    })
}

/// A BMP decoder.
///
/// # Usage
///
/// ## Extracting image metadata
/// ```no_run
/// use fbshow_bmp::BmpDecoder;
///
/// fn main() -> Result<(), fbshow_bmp::BmpDecoderErrors> {
///     let bytes = std::fs::read("image.bmp").unwrap();
///     let mut decoder = BmpDecoder::new(&bytes);
///     decoder.decode_headers()?;
///     // after decoding headers, dimensions are present
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("Image width: {}\t Image height: {}", w, h);
///     Ok(())
/// }
/// ```
///
/// ## Getting the pixels
/// ```no_run
/// use fbshow_bmp::BmpDecoder;
///
/// fn main() -> Result<(), fbshow_bmp::BmpDecoderErrors> {
///     let bytes = std::fs::read("image.bmp").unwrap();
///     let pixels = BmpDecoder::new(&bytes).decode()?;
///     println!("Top left pixel: {:08x}", pixels.row(0)[0]);
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<'a> {
    bytes:   &'a [u8],
    options: DecoderOptions,
    header:  Option<ImageHeader>
}

impl<'a> BmpDecoder<'a> {
    /// Create a new bmp decoder that reads data from
    /// `data`
    pub fn new(data: &'a [u8]) -> BmpDecoder<'a> {
        BmpDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> BmpDecoder<'a> {
        BmpDecoder {
            bytes: data,
            options,
            header: None
        }
    }

    /// Decode headers stored in the bmp file and store
    /// information in the decode context
    ///
    /// Calling this more than once is cheap, headers are only parsed once.
    pub fn decode_headers(&mut self) -> Result<(), BmpDecoderErrors> {
        if self.header.is_none() {
            self.header = Some(decode_header(self.bytes, &self.options)?);
        }
        Ok(())
    }

    /// Return the decoded header or `None` if headers
    /// haven't been decoded
    pub const fn header(&self) -> Option<ImageHeader> {
        self.header
    }

    /// Get the width and height of the image or `None` if headers
    /// haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header.map(|x| (x.width, x.height))
    }

    /// Number of pixels the output will hold
    ///
    /// Returns `None` if headers haven't been decoded or if calculation overflows
    pub fn output_buf_size(&self) -> Option<usize> {
        let header = self.header?;
        header.width.checked_mul(header.height)
    }

    /// Decode into a caller provided buffer of
    /// `output_buf_size` pixels
    pub fn decode_into(&mut self, out: &mut [u32]) -> Result<(), BmpDecoderErrors> {
        self.decode_headers()?;

        let header = self.header.ok_or(BmpDecoderErrors::GenericStatic(
            "Headers not decoded"
        ))?;
        let data = self
            .bytes
            .get(header.pixel_offset..)
            .ok_or(BmpDecoderErrors::TooSmallBuffer(
                header.pixel_offset,
                self.bytes.len()
            ))?;

        convert_bgr24(data, header.width, header.height, header.top_down, out)
    }

    /// Decode the whole image into a top-down pixel buffer
    pub fn decode(&mut self) -> Result<PixelBuffer, BmpDecoderErrors> {
        self.decode_headers()?;

        let size = self
            .output_buf_size()
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;
        let mut pixels = vec![0; size];

        self.decode_into(&mut pixels)?;

        let (width, height) = self
            .dimensions()
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        PixelBuffer::from_pixels(width, height, pixels).ok_or(BmpDecoderErrors::OverFlowOccurred)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use fbshow_core::options::DecoderOptions;

    use crate::common::BmpCompression;
    use crate::decoder::{decode_header, probe_bmp, MIN_HEADER_SIZE};
    use crate::BmpDecoderErrors;

    fn header_bytes(width: u32, height: i32, depth: u16, compression: u32) -> Vec<u8> {
        let mut out = vec![0_u8; 54];
        out[0..2].copy_from_slice(b"BM");
        out[2..6].copy_from_slice(&54_u32.to_le_bytes());
        out[10..14].copy_from_slice(&54_u32.to_le_bytes());
        out[14..18].copy_from_slice(&40_u32.to_le_bytes());
        out[18..22].copy_from_slice(&width.to_le_bytes());
        out[22..26].copy_from_slice(&height.to_le_bytes());
        out[26..28].copy_from_slice(&1_u16.to_le_bytes());
        out[28..30].copy_from_slice(&depth.to_le_bytes());
        out[30..34].copy_from_slice(&compression.to_le_bytes());
        out
    }

    #[test]
    fn reads_fields_at_fixed_offsets() {
        let mut bytes = header_bytes(640, 480, 24, 0);
        bytes[10..14].copy_from_slice(&138_u32.to_le_bytes());

        let header = decode_header(&bytes, &DecoderOptions::default()).unwrap();
        assert_eq!(header.pixel_offset, 138);
        assert_eq!(header.width, 640);
        assert_eq!(header.height, 480);
        assert_eq!(header.depth, 24);
        assert_eq!(header.compression, BmpCompression::RGB);
        assert!(!header.top_down);
        assert!(probe_bmp(&bytes));
    }

    #[test]
    fn negative_height_is_top_down() {
        let bytes = header_bytes(3, -7, 24, 0);
        let header = decode_header(&bytes, &DecoderOptions::default()).unwrap();

        assert_eq!(header.height, 7);
        assert!(header.top_down);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let bytes = header_bytes(2, 2, 24, 0);
        let err = decode_header(&bytes[..MIN_HEADER_SIZE - 1], &DecoderOptions::default());

        assert!(matches!(
            err,
            Err(BmpDecoderErrors::TooSmallBuffer(MIN_HEADER_SIZE, 33))
        ));
    }

    #[test]
    fn only_24_bits_are_accepted() {
        for depth in [1, 4, 8, 16, 32] {
            // header only, no pixel bytes exist to be read
            let bytes = header_bytes(2, 2, depth, 0);
            let err = decode_header(&bytes[..MIN_HEADER_SIZE], &DecoderOptions::default());

            assert!(matches!(err, Err(BmpDecoderErrors::UnsupportedDepth(d)) if d == depth));
        }
    }

    #[test]
    fn compressed_images_are_rejected() {
        let bytes = header_bytes(2, 2, 24, 1);
        let err = decode_header(&bytes, &DecoderOptions::default());

        assert!(matches!(
            err,
            Err(BmpDecoderErrors::UnsupportedCompression(BmpCompression::RLE8))
        ));
    }

    #[test]
    fn signature_is_checked_in_strict_mode_only() {
        let mut bytes = header_bytes(2, 2, 24, 0);
        bytes[0..2].copy_from_slice(b"XX");

        assert!(matches!(
            decode_header(&bytes, &DecoderOptions::default()),
            Err(BmpDecoderErrors::InvalidMagicBytes)
        ));
        assert!(!probe_bmp(&bytes));

        let header = decode_header(&bytes, &DecoderOptions::new_lenient()).unwrap();
        assert_eq!((header.width, header.height), (2, 2));
    }

    #[test]
    fn dimension_limits() {
        let options = DecoderOptions::default()
            .set_max_width(100)
            .set_max_height(50);

        let bytes = header_bytes(101, 10, 24, 0);
        assert!(matches!(
            decode_header(&bytes, &options),
            Err(BmpDecoderErrors::TooLargeDimensions("width", 100, 101))
        ));

        let bytes = header_bytes(10, -51, 24, 0);
        assert!(matches!(
            decode_header(&bytes, &options),
            Err(BmpDecoderErrors::TooLargeDimensions("height", 50, 51))
        ));

        let bytes = header_bytes(0, 10, 24, 0);
        assert!(decode_header(&bytes, &options).is_err());
    }
}
