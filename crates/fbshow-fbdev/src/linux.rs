/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Linux fbdev (`/dev/fbN`) backend
#![allow(non_camel_case_types)]

use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::Path;

use fbshow_core::pixels::{ChannelField, ChannelLayout};
use libc::{c_char, c_ulong};
use log::trace;
use memmap2::{MmapMut, MmapOptions};

use crate::device::FramebufferDevice;
use crate::geometry::{FixedInfo, VariableInfo};
use crate::DeviceErrors;

// ioctl requests from <linux/fb.h>
const FBIOGET_VSCREENINFO: c_ulong = 0x4600;
const FBIOPUT_VSCREENINFO: c_ulong = 0x4601;
const FBIOGET_FSCREENINFO: c_ulong = 0x4602;

const FB_ACTIVATE_NOW: u32 = 0;
const FB_ACTIVATE_FORCE: u32 = 128;

#[repr(C)]
#[derive(Copy, Clone, Default)]
#[allow(dead_code)]
struct fb_bitfield {
    offset:    u32,
    length:    u32,
    msb_right: u32
}

#[repr(C)]
#[derive(Copy, Clone)]
#[allow(dead_code)]
struct fb_fix_screeninfo {
    id:           [c_char; 16],
    smem_start:   c_ulong,
    smem_len:     u32,
    type_:        u32,
    type_aux:     u32,
    visual:       u32,
    xpanstep:     u16,
    ypanstep:     u16,
    ywrapstep:    u16,
    line_length:  u32,
    mmio_start:   c_ulong,
    mmio_len:     u32,
    accel:        u32,
    capabilities: u16,
    reserved:     [u16; 2]
}

#[repr(C)]
#[derive(Copy, Clone, Default)]
#[allow(dead_code)]
struct fb_var_screeninfo {
    xres:           u32,
    yres:           u32,
    xres_virtual:   u32,
    yres_virtual:   u32,
    xoffset:        u32,
    yoffset:        u32,
    bits_per_pixel: u32,
    grayscale:      u32,
    red:            fb_bitfield,
    green:          fb_bitfield,
    blue:           fb_bitfield,
    transp:         fb_bitfield,
    nonstd:         u32,
    activate:       u32,
    height:         u32,
    width:          u32,
    accel_flags:    u32,
    pixclock:       u32,
    left_margin:    u32,
    right_margin:   u32,
    upper_margin:   u32,
    lower_margin:   u32,
    hsync_len:      u32,
    vsync_len:      u32,
    sync:           u32,
    vmode:          u32,
    rotate:         u32,
    colorspace:     u32,
    reserved:       [u32; 4]
}

impl fb_bitfield {
    const fn to_field(self) -> ChannelField {
        ChannelField::new(self.offset, self.length)
    }
}

/// A framebuffer device node such as `/dev/fb0`
pub struct LinuxFramebuffer {
    file:     File,
    name:     String,
    /// Last queried mode, written back on activation
    var_info: Option<fb_var_screeninfo>
}

impl LinuxFramebuffer {
    /// Open the device node for reading and writing
    pub fn open<P: AsRef<Path>>(path: P) -> Result<LinuxFramebuffer, DeviceErrors> {
        let name = path.as_ref().display().to_string();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path.as_ref())
            .map_err(|e| DeviceErrors::Open(name.clone(), e))?;

        Ok(LinuxFramebuffer {
            file,
            name,
            var_info: None
        })
    }

    /// Issue `request` with `arg` as its argument
    ///
    /// # Safety
    /// `T` must be the structure the kernel expects for `request`
    unsafe fn ioctl<T>(&self, request: c_ulong, arg: &mut T) -> std::io::Result<()> {
        if libc::ioctl(self.file.as_raw_fd(), request as _, arg as *mut T) != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(())
    }
}

impl FramebufferDevice for LinuxFramebuffer {
    type Mapping = MmapMut;

    fn name(&self) -> &str {
        &self.name
    }

    fn fixed_info(&mut self) -> Result<FixedInfo, DeviceErrors> {
        // SAFETY: plain old data, all zero is a valid value
        let mut info: fb_fix_screeninfo = unsafe { std::mem::zeroed() };
        // SAFETY: FBIOGET_FSCREENINFO fills a fb_fix_screeninfo
        unsafe { self.ioctl(FBIOGET_FSCREENINFO, &mut info) }
            .map_err(|e| DeviceErrors::Query("FBIOGET_FSCREENINFO", e))?;

        let id: Vec<u8> = info
            .id
            .iter()
            .take_while(|x| **x != 0)
            .map(|x| *x as u8)
            .collect();

        trace!("smem_start={:#x}, smem_len={}", info.smem_start, info.smem_len);

        Ok(FixedInfo {
            id:            String::from_utf8_lossy(&id).into_owned(),
            memory_offset: info.smem_start as u64,
            memory_size:   info.smem_len as usize,
            line_length:   info.line_length as usize
        })
    }

    fn variable_info(&mut self) -> Result<VariableInfo, DeviceErrors> {
        let mut info = fb_var_screeninfo::default();
        // SAFETY: FBIOGET_VSCREENINFO fills a fb_var_screeninfo
        unsafe { self.ioctl(FBIOGET_VSCREENINFO, &mut info) }
            .map_err(|e| DeviceErrors::Query("FBIOGET_VSCREENINFO", e))?;

        self.var_info = Some(info);

        Ok(VariableInfo {
            xres:           info.xres as usize,
            yres:           info.yres as usize,
            xres_virtual:   info.xres_virtual as usize,
            yres_virtual:   info.yres_virtual as usize,
            xoffset:        info.xoffset as usize,
            yoffset:        info.yoffset as usize,
            bits_per_pixel: info.bits_per_pixel,
            layout:         ChannelLayout {
                red:    info.red.to_field(),
                green:  info.green.to_field(),
                blue:   info.blue.to_field(),
                transp: info.transp.to_field()
            }
        })
    }

    fn map(&mut self, size: usize) -> Result<MmapMut, DeviceErrors> {
        // SAFETY: the device memory is shared with the display hardware only,
        // we are the sole writer from this process
        unsafe { MmapOptions::new().offset(0).len(size).map_mut(&self.file) }
            .map_err(DeviceErrors::Map)
    }

    fn activate(&mut self) -> Result<(), DeviceErrors> {
        let mut info = self.var_info.ok_or(DeviceErrors::InvalidGeometry(
            "screen mode activated before it was queried"
        ))?;
        info.activate |= FB_ACTIVATE_NOW | FB_ACTIVATE_FORCE;

        // SAFETY: FBIOPUT_VSCREENINFO reads and updates a fb_var_screeninfo
        unsafe { self.ioctl(FBIOPUT_VSCREENINFO, &mut info) }.map_err(DeviceErrors::Commit)?;

        self.var_info = Some(info);
        Ok(())
    }
}
