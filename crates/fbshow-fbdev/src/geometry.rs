/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use fbshow_core::pixels::ChannelLayout;

use crate::DeviceErrors;

/// Every pixel is written as one 32 bit word
pub const BYTES_PER_PIXEL: usize = 4;

/// Geometry that does not change with the video mode
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FixedInfo {
    /// Driver identification string
    pub id:            String,
    /// Start of framebuffer memory as reported by the driver.
    ///
    /// This is a bus address, the mapping already begins there.
    pub memory_offset: u64,
    /// Bytes of framebuffer memory to map
    pub memory_size:   usize,
    /// Bytes per device row, may exceed `xres * 4`
    pub line_length:   usize
}

/// Geometry of the current video mode
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct VariableInfo {
    pub xres:           usize,
    pub yres:           usize,
    pub xres_virtual:   usize,
    pub yres_virtual:   usize,
    /// Visible area offset inside the virtual screen
    pub xoffset:        usize,
    pub yoffset:        usize,
    pub bits_per_pixel: u32,
    pub layout:         ChannelLayout
}

/// Everything needed to draw on a device
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeviceGeometry {
    pub id:             String,
    pub xres:           usize,
    pub yres:           usize,
    pub xres_virtual:   usize,
    pub yres_virtual:   usize,
    pub xoffset:        usize,
    pub yoffset:        usize,
    pub line_length:    usize,
    pub bits_per_pixel: u32,
    pub layout:         ChannelLayout,
    pub memory_offset:  u64,
    pub memory_size:    usize
}

impl DeviceGeometry {
    pub fn from_parts(fixed: FixedInfo, variable: VariableInfo) -> DeviceGeometry {
        DeviceGeometry {
            id:             fixed.id,
            xres:           variable.xres,
            yres:           variable.yres,
            xres_virtual:   variable.xres_virtual,
            yres_virtual:   variable.yres_virtual,
            xoffset:        variable.xoffset,
            yoffset:        variable.yoffset,
            line_length:    fixed.line_length,
            bits_per_pixel: variable.bits_per_pixel,
            layout:         variable.layout,
            memory_offset:  fixed.memory_offset,
            memory_size:    fixed.memory_size
        }
    }

    /// Check that a `width` x `height` image fits on the visible screen
    ///
    /// # Errors
    /// `TooLarge` iff `width > xres` or `height > yres`
    pub fn validate(&self, width: usize, height: usize) -> Result<(), DeviceErrors> {
        if width > self.xres || height > self.yres {
            return Err(DeviceErrors::TooLarge {
                width,
                height,
                xres: self.xres,
                yres: self.yres
            });
        }
        Ok(())
    }

    /// Byte offset of pixel `(x, y)` of the visible screen
    /// from the start of the mapping.
    ///
    /// The mapping starts at device memory offset 0, so the reported
    /// `memory_offset` never takes part in this.
    #[inline]
    pub const fn pixel_offset(&self, x: usize, y: usize) -> usize {
        (y + self.yoffset) * self.line_length + (x + self.xoffset) * BYTES_PER_PIXEL
    }

    /// Check that a `width` x `height` frame can be written through
    /// a mapping of `memory_size` bytes without leaving it.
    pub fn check_drawable(&self, width: usize, height: usize) -> Result<(), DeviceErrors> {
        self.validate(width, height)?;

        if self.bits_per_pixel as usize != BYTES_PER_PIXEL * 8 {
            return Err(DeviceErrors::UnsupportedDepth(self.bits_per_pixel));
        }
        if !self.layout.is_valid() {
            return Err(DeviceErrors::UnsupportedLayout(self.layout));
        }
        if width == 0 || height == 0 {
            return Ok(());
        }
        let row_end = (self.xoffset + width)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or(DeviceErrors::InvalidGeometry("row overflows"))?;

        if row_end > self.line_length {
            return Err(DeviceErrors::InvalidGeometry(
                "line length is shorter than a visible row"
            ));
        }
        let needed = (self.yoffset + height - 1)
            .checked_mul(self.line_length)
            .and_then(|x| x.checked_add(row_end))
            .ok_or(DeviceErrors::InvalidGeometry("frame overflows"))?;

        if needed > self.memory_size {
            return Err(DeviceErrors::MappingTooSmall(needed, self.memory_size));
        }
        Ok(())
    }
}
