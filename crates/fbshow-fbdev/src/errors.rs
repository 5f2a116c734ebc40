/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use fbshow_core::pixels::ChannelLayout;

use crate::blit::BlitState;

/// Errors raised while talking to or drawing on a display
pub enum DeviceErrors {
    /// The device node could not be opened
    Open(String, std::io::Error),
    /// A geometry query failed, with the request that failed
    Query(&'static str, std::io::Error),
    /// Mapping device memory failed
    Map(std::io::Error),
    /// Committing the screen mode failed
    Commit(std::io::Error),
    /// The image does not fit on the visible screen
    TooLarge {
        width:  usize,
        height: usize,
        xres:   usize,
        yres:   usize
    },
    /// Only 32 bits per pixel devices are drawn on
    UnsupportedDepth(u32),
    /// Channel fields overlap or do not fit a pixel word
    UnsupportedLayout(ChannelLayout),
    /// The frame needs more bytes than the device maps,
    /// needed, mapped
    MappingTooSmall(usize, usize),
    InvalidGeometry(&'static str),
    /// A blit operation was called out of order
    InvalidState(&'static str, BlitState)
}

impl Debug for DeviceErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(path, err) => {
                writeln!(f, "Failed to open the framebuffer device {path}: {err}")
            }
            Self::Query(request, err) => {
                writeln!(f, "Failed to retrieve framebuffer info ({request}): {err}")
            }
            Self::Map(err) => {
                writeln!(f, "Failed to map the framebuffer: {err}")
            }
            Self::Commit(err) => {
                writeln!(f, "Failed to update display info: {err}")
            }
            Self::TooLarge {
                width,
                height,
                xres,
                yres
            } => {
                writeln!(
                    f,
                    "Image is too large to display, {width}x{height} exceeds {xres}x{yres}"
                )
            }
            Self::UnsupportedDepth(depth) => {
                writeln!(f, "Unsupported framebuffer depth {depth}, expected 32")
            }
            Self::UnsupportedLayout(layout) => {
                writeln!(f, "Unsupported channel layout {:?}", layout)
            }
            Self::MappingTooSmall(needed, mapped) => {
                writeln!(
                    f,
                    "Frame needs {needed} bytes of device memory but only {mapped} are mapped"
                )
            }
            Self::InvalidGeometry(reason) => {
                writeln!(f, "Invalid framebuffer geometry: {reason}")
            }
            Self::InvalidState(operation, state) => {
                writeln!(f, "Cannot {operation} while {state:?}")
            }
        }
    }
}

impl Display for DeviceErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for DeviceErrors {}
