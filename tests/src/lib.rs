/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::path::{Path, PathBuf};

use fbshow_bmp::row_stride;
use serde::Deserialize;

mod bmp;
mod display;

/// How a fixture is expected to end
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Decoded and drawn
    Displayed,
    /// Rejected by the decoder
    FormatError,
    /// Larger than the device
    TooLarge
}

/// A synthetic 24 bit image and the device it is drawn on
#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    pub name:        String,
    /// Rows top first, pixels as `RRGGBB` hex
    pub rows:        Vec<Vec<String>>,
    #[serde(default)]
    pub top_down:    bool,
    /// Bytes between the headers and the pixel data
    #[serde(default)]
    pub gap:         usize,
    pub device:      (usize, usize),
    pub line_length: Option<usize>,
    pub outcome:     Outcome,
    pub comment:     Option<String>
}

impl TestEntry {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Pixels as `[r, g, b]`, top row first
    pub fn pixels(&self) -> Vec<Vec<[u8; 3]>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|x| parse_hex(x)).collect())
            .collect()
    }
}

pub fn parse_hex(color: &str) -> [u8; 3] {
    let value = u32::from_str_radix(color, 16).unwrap();
    let [_, r, g, b] = value.to_be_bytes();
    [r, g, b]
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join(name)
}

pub fn read_fixtures(name: &str) -> Vec<TestEntry> {
    let json_file = std::fs::read(fixture_path(name)).unwrap();
    serde_json::from_slice(&json_file).unwrap()
}

/// Write a 24 bit BMP with a 40 byte info header, `rows` are given top first
pub fn encode_bmp(rows: &[Vec<[u8; 3]>], top_down: bool, gap: usize) -> Vec<u8> {
    let width = rows.first().map_or(0, Vec::len);
    let height = rows.len();
    let stride = row_stride(width).unwrap();
    let offset = 54 + gap;
    let size = offset + stride * height;

    let mut out = vec![0_u8; size];
    out[0..2].copy_from_slice(b"BM");
    out[2..6].copy_from_slice(&(size as u32).to_le_bytes());
    out[10..14].copy_from_slice(&(offset as u32).to_le_bytes());
    out[14..18].copy_from_slice(&40_u32.to_le_bytes());
    out[18..22].copy_from_slice(&(width as u32).to_le_bytes());
    let stored_height = if top_down { -(height as i32) } else { height as i32 };
    out[22..26].copy_from_slice(&stored_height.to_le_bytes());
    out[26..28].copy_from_slice(&1_u16.to_le_bytes());
    out[28..30].copy_from_slice(&24_u16.to_le_bytes());

    for (i, row) in rows.iter().enumerate() {
        let stored = if top_down { i } else { height - 1 - i };
        let start = offset + stored * stride;

        for (x, [r, g, b]) in row.iter().enumerate() {
            out[start + x * 3..start + x * 3 + 3].copy_from_slice(&[*b, *g, *r]);
        }
    }
    out
}

/// Read the native endian word at `offset`
pub fn word_at(mapping: &[u8], offset: usize) -> u32 {
    u32::from_ne_bytes(mapping[offset..offset + 4].try_into().unwrap())
}
