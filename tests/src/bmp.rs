/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use fbshow_bmp::{BmpDecoder, BmpDecoderErrors};
use fbshow_core::options::DecoderOptions;
use fbshow_core::pixels::{argb, PixelBuffer};
use fbshow_fbdev::{BlitLoop, BlitOptions, DeviceErrors, Display, MemoryFramebuffer};

use crate::{encode_bmp, read_fixtures, word_at, Outcome, TestEntry};

/// Run one fixture, describing the first mismatch found
fn check_entry(entry: &TestEntry) -> Result<(), String> {
    let pixels = entry.pixels();
    let file = encode_bmp(&pixels, entry.top_down, entry.gap);

    let mut decoder = BmpDecoder::new_with_options(&file, DecoderOptions::default());
    let image = match (decoder.decode(), entry.outcome) {
        (Err(_), Outcome::FormatError) => return Ok(()),
        (Err(e), _) => return Err(format!("decode failed: {e:?}")),
        (Ok(_), Outcome::FormatError) => return Err("decoded a broken file".to_string()),
        (Ok(image), _) => image
    };
    check_decoded(&image, &pixels)?;

    let (xres, yres) = entry.device;
    let mut device = MemoryFramebuffer::new(xres, yres);
    if let Some(line_length) = entry.line_length {
        device = device.with_line_length(line_length);
    }
    let display = Display::open(device).map_err(|e| format!("{e:?}"))?;

    let mut blit = BlitLoop::new(BlitOptions::default());
    blit.load_image(image).map_err(|e| format!("{e:?}"))?;

    match (blit.attach(display), entry.outcome) {
        (Err(DeviceErrors::TooLarge { .. }), Outcome::TooLarge) => return Ok(()),
        (Err(e), _) => return Err(format!("attach failed: {e:?}")),
        (Ok(()), Outcome::TooLarge) => return Err("image larger than the device was accepted".to_string()),
        (Ok(()), _) => ()
    }
    blit.present().map_err(|e| format!("{e:?}"))?;

    let display = blit.display().ok_or("display lost")?;
    let geometry = display.geometry();
    let mapping = display.mapping();
    let mut expected = vec![0_u8; mapping.len()];

    for (y, row) in pixels.iter().enumerate() {
        for (x, [r, g, b]) in row.iter().enumerate() {
            let offset = geometry.pixel_offset(x, y);
            expected[offset..offset + 4].copy_from_slice(&argb(*r, *g, *b).to_ne_bytes());
        }
    }
    if mapping != expected.as_slice() {
        let first = mapping
            .iter()
            .zip(&expected)
            .position(|(a, b)| a != b)
            .unwrap_or(0);
        return Err(format!(
            "mapping differs at byte {first}, word there is {:08x}",
            word_at(mapping, first - first % 4)
        ));
    }
    Ok(())
}

fn check_decoded(image: &PixelBuffer, pixels: &[Vec<[u8; 3]>]) -> Result<(), String> {
    for (y, row) in pixels.iter().enumerate() {
        for (x, [r, g, b]) in row.iter().enumerate() {
            let found = image.get(x, y);

            if found != Some(argb(*r, *g, *b)) {
                return Err(format!("pixel ({x},{y}) decoded as {found:x?}"));
            }
        }
    }
    Ok(())
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_bmp() {
    let entries = read_fixtures("bmp.json");
    assert!(!entries.is_empty());

    let mut error = false;
    let mut files = Vec::new();

    for entry in &entries {
        if let Err(reason) = check_entry(entry) {
            error = true;
            files.push(entry.name.clone());
            // report error
            eprintln!("Fixture {} failed: {}\nConfig:{:#?}\n", entry.name, reason, entry);
        }
    }
    if error {
        panic!("Errors found during test decoding\n {:#?}", files);
    }
}

#[test]
fn strict_signature_check() {
    let mut file = encode_bmp(&[vec![[1, 2, 3]]], false, 0);
    file[0..2].copy_from_slice(b"XX");

    let strict = BmpDecoder::new(&file).decode();
    assert!(matches!(strict, Err(BmpDecoderErrors::InvalidMagicBytes)));

    let image = BmpDecoder::new_with_options(&file, DecoderOptions::new_lenient())
        .decode()
        .unwrap();
    assert_eq!(image.get(0, 0), Some(argb(1, 2, 3)));
}
