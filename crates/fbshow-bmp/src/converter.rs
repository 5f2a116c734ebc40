/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Expansion of padded BGR rows into top-down ARGB pixels
use fbshow_core::pixels::argb;

use crate::BmpDecoderErrors;

/// Bytes occupied by one stored row of `width` 24 bit pixels,
/// rounded up to a multiple of four.
///
/// Returns `None` on overflow.
#[inline]
pub fn row_stride(width: usize) -> Option<usize> {
    Some(width.checked_mul(3)?.checked_add(3)? & !3)
}

/// Convert 24 bit BGR rows starting at `data` into opaque
/// `0xAARRGGBB` pixels in `out`.
///
/// Each source row is `row_stride(width)` bytes apart. Output row 0 is
/// the visually top row, so bottom-up files have their rows reversed.
/// Padding after the final stored row is not required to be present.
///
/// # Errors
/// `TooSmallBuffer` if `data` cannot hold every row or `out` is not
/// `width*height` pixels.
pub fn convert_bgr24(
    data: &[u8], width: usize, height: usize, top_down: bool, out: &mut [u32]
) -> Result<(), BmpDecoderErrors> {
    let out_size = width
        .checked_mul(height)
        .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

    if out.len() != out_size {
        return Err(BmpDecoderErrors::TooSmallBuffer(out_size, out.len()));
    }
    if out_size == 0 {
        return Ok(());
    }
    let stride = row_stride(width).ok_or(BmpDecoderErrors::OverFlowOccurred)?;
    let row_bytes = width * 3;

    let needed = stride
        .checked_mul(height - 1)
        .and_then(|x| x.checked_add(row_bytes))
        .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

    if data.len() < needed {
        return Err(BmpDecoderErrors::TooSmallBuffer(needed, data.len()));
    }

    for (y, out_row) in out.chunks_exact_mut(width).enumerate() {
        let stored_row = if top_down { y } else { height - 1 - y };
        let start = stored_row * stride;
        let in_row = &data[start..start + row_bytes];

        for (pixel, bgr) in out_row.iter_mut().zip(in_row.chunks_exact(3)) {
            *pixel = argb(bgr[2], bgr[1], bgr[0]);
        }
    }
    Ok(())
}
