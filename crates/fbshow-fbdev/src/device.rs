/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ops::DerefMut;

use log::{debug, info};

use crate::geometry::{DeviceGeometry, FixedInfo, VariableInfo};
use crate::DeviceErrors;

/// Capabilities of a linear framebuffer device.
///
/// Opening is left to each implementation's constructor, closing
/// happens when the device is dropped and unmapping when its mapping
/// is dropped.
pub trait FramebufferDevice {
    /// A writable view of device memory
    type Mapping: DerefMut<Target = [u8]>;

    /// Name used in log messages, usually the device path
    fn name(&self) -> &str;

    /// Query geometry that is fixed for the device
    fn fixed_info(&mut self) -> Result<FixedInfo, DeviceErrors>;

    /// Query geometry of the current video mode
    fn variable_info(&mut self) -> Result<VariableInfo, DeviceErrors>;

    /// Map `size` bytes of device memory starting at offset 0
    fn map(&mut self, size: usize) -> Result<Self::Mapping, DeviceErrors>;

    /// Commit the last queried video mode, forcing it to take
    /// effect now
    fn activate(&mut self) -> Result<(), DeviceErrors>;
}

/// Issue both geometry queries and combine them
pub fn query_geometry<D: FramebufferDevice>(device: &mut D) -> Result<DeviceGeometry, DeviceErrors> {
    debug!("Querying geometry of {}", device.name());

    let fixed = device.fixed_info()?;
    let variable = device.variable_info()?;
    let geometry = DeviceGeometry::from_parts(fixed, variable);

    info!(
        "line_length={}, xres={}, yres={}, vxres={}, vyres={}, xoffset={}, yoffset={}, bpp={}",
        geometry.line_length,
        geometry.xres,
        geometry.yres,
        geometry.xres_virtual,
        geometry.yres_virtual,
        geometry.xoffset,
        geometry.yoffset,
        geometry.bits_per_pixel
    );
    let layout = geometry.layout;
    info!("red: offset={}, length={}", layout.red.offset, layout.red.length);
    info!("green: offset={}, length={}", layout.green.offset, layout.green.length);
    info!("blue: offset={}, length={}", layout.blue.offset, layout.blue.length);
    info!(
        "memory: start={:#x}, size={}",
        geometry.memory_offset, geometry.memory_size
    );

    Ok(geometry)
}

/// A device together with its mapped memory.
///
/// The mapping lives exactly as long as the display. Dropping the
/// display, on success, error or shutdown, unmaps the memory first
/// and closes the device after.
pub struct Display<D: FramebufferDevice> {
    // field order is drop order
    mapping:   D::Mapping,
    geometry:  DeviceGeometry,
    device:    D,
    activated: bool
}

impl<D: FramebufferDevice> Display<D> {
    /// Map `geometry.memory_size` bytes of `device`
    pub fn map(mut device: D, geometry: DeviceGeometry) -> Result<Display<D>, DeviceErrors> {
        debug!("Mapping {} bytes of {}", geometry.memory_size, device.name());

        let mapping = device.map(geometry.memory_size)?;

        if mapping.len() < geometry.memory_size {
            return Err(DeviceErrors::MappingTooSmall(
                geometry.memory_size,
                mapping.len()
            ));
        }
        Ok(Display {
            mapping,
            geometry,
            device,
            activated: false
        })
    }

    /// Query the geometry of `device` then map all of its memory
    pub fn open(mut device: D) -> Result<Display<D>, DeviceErrors> {
        let geometry = query_geometry(&mut device)?;
        Display::map(device, geometry)
    }

    pub fn geometry(&self) -> &DeviceGeometry {
        &self.geometry
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn mapping(&self) -> &[u8] {
        &self.mapping
    }

    pub fn mapping_mut(&mut self) -> &mut [u8] {
        &mut self.mapping
    }

    /// Zero the whole mapped region
    pub fn clear(&mut self) {
        self.mapping.fill(0);
    }

    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Commit the mode, only the first call reaches the device
    pub fn activate(&mut self) -> Result<(), DeviceErrors> {
        if !self.activated {
            debug!("Activating {}", self.device.name());
            self.device.activate()?;
            self.activated = true;
        }
        Ok(())
    }
}

impl<D: FramebufferDevice> Drop for Display<D> {
    fn drop(&mut self) {
        debug!("Releasing {}", self.device.name());
    }
}
