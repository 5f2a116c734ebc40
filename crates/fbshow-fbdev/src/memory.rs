/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! An in-memory framebuffer, used for dry runs and tests
use std::io::{Error, ErrorKind};

use fbshow_core::pixels::ChannelLayout;

use crate::device::FramebufferDevice;
use crate::geometry::{FixedInfo, VariableInfo, BYTES_PER_PIXEL};
use crate::DeviceErrors;

/// A device request a [`MemoryFramebuffer`] should fail
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SimulatedFailure {
    FixedQuery,
    VariableQuery,
    Map,
    Activate
}

/// A framebuffer backed by a plain buffer.
///
/// Mappings start filled with `stale_byte` so clearing can be observed.
#[derive(Clone, Debug)]
pub struct MemoryFramebuffer {
    fixed:       FixedInfo,
    variable:    VariableInfo,
    stale_byte:  u8,
    failure:     Option<SimulatedFailure>,
    activations: usize,
    mappings:    usize
}

impl MemoryFramebuffer {
    /// A 32 bit XRGB device with unpadded rows
    pub fn new(xres: usize, yres: usize) -> MemoryFramebuffer {
        let line_length = xres * BYTES_PER_PIXEL;

        MemoryFramebuffer {
            fixed:       FixedInfo {
                id:            "memory".to_string(),
                memory_offset: 0,
                memory_size:   line_length * yres,
                line_length
            },
            variable:    VariableInfo {
                xres,
                yres,
                xres_virtual: xres,
                yres_virtual: yres,
                xoffset: 0,
                yoffset: 0,
                bits_per_pixel: 32,
                layout: ChannelLayout::XRGB8888
            },
            stale_byte:  0x5A,
            failure:     None,
            activations: 0,
            mappings:    0
        }
    }

    /// Set the row stride, memory is resized to hold every virtual row
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.fixed.line_length = line_length;
        self.fixed.memory_size = line_length * self.variable.yres_virtual;
        self
    }

    pub fn with_virtual_size(mut self, xres_virtual: usize, yres_virtual: usize) -> Self {
        self.variable.xres_virtual = xres_virtual;
        self.variable.yres_virtual = yres_virtual;
        self.with_line_length(xres_virtual * BYTES_PER_PIXEL)
    }

    pub fn with_pan(mut self, xoffset: usize, yoffset: usize) -> Self {
        self.variable.xoffset = xoffset;
        self.variable.yoffset = yoffset;
        self
    }

    pub fn with_memory_offset(mut self, memory_offset: u64) -> Self {
        self.fixed.memory_offset = memory_offset;
        self
    }

    pub fn with_memory_size(mut self, memory_size: usize) -> Self {
        self.fixed.memory_size = memory_size;
        self
    }

    pub fn with_layout(mut self, layout: ChannelLayout) -> Self {
        self.variable.layout = layout;
        self
    }

    pub fn with_bits_per_pixel(mut self, bits_per_pixel: u32) -> Self {
        self.variable.bits_per_pixel = bits_per_pixel;
        self
    }

    pub fn with_stale_byte(mut self, stale_byte: u8) -> Self {
        self.stale_byte = stale_byte;
        self
    }

    pub fn with_failure(mut self, failure: SimulatedFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Number of mode commits that reached the device
    pub const fn activations(&self) -> usize {
        self.activations
    }

    pub const fn mappings(&self) -> usize {
        self.mappings
    }

    fn fail_on(&self, failure: SimulatedFailure) -> Result<(), Error> {
        if self.failure == Some(failure) {
            return Err(Error::new(
                ErrorKind::Other,
                format!("simulated {failure:?} failure")
            ));
        }
        Ok(())
    }
}

impl FramebufferDevice for MemoryFramebuffer {
    type Mapping = Vec<u8>;

    fn name(&self) -> &str {
        &self.fixed.id
    }

    fn fixed_info(&mut self) -> Result<FixedInfo, DeviceErrors> {
        self.fail_on(SimulatedFailure::FixedQuery)
            .map_err(|e| DeviceErrors::Query("FBIOGET_FSCREENINFO", e))?;
        Ok(self.fixed.clone())
    }

    fn variable_info(&mut self) -> Result<VariableInfo, DeviceErrors> {
        self.fail_on(SimulatedFailure::VariableQuery)
            .map_err(|e| DeviceErrors::Query("FBIOGET_VSCREENINFO", e))?;
        Ok(self.variable)
    }

    fn map(&mut self, size: usize) -> Result<Vec<u8>, DeviceErrors> {
        self.fail_on(SimulatedFailure::Map).map_err(DeviceErrors::Map)?;
        self.mappings += 1;
        Ok(vec![self.stale_byte; size])
    }

    fn activate(&mut self) -> Result<(), DeviceErrors> {
        self.fail_on(SimulatedFailure::Activate)
            .map_err(DeviceErrors::Commit)?;
        self.activations += 1;
        Ok(())
    }
}
