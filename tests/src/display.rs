/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use fbshow_bmp::BmpDecoder;
use fbshow_core::pixels::{argb, ChannelField, ChannelLayout, PixelBuffer};
use fbshow_fbdev::{
    BlitLoop, BlitOptions, BlitState, DeviceErrors, Display, FixedInfo, FramebufferDevice,
    MemoryFramebuffer, ShutdownToken, SimulatedFailure, VariableInfo
};

use crate::{encode_bmp, word_at};

/// Wraps a device and counts how often it was dropped
struct TrackedDevice {
    inner:    MemoryFramebuffer,
    released: Rc<Cell<usize>>
}

impl TrackedDevice {
    fn new(inner: MemoryFramebuffer) -> (TrackedDevice, Rc<Cell<usize>>) {
        let released = Rc::new(Cell::new(0));
        let device = TrackedDevice {
            inner,
            released: released.clone()
        };
        (device, released)
    }
}

impl Drop for TrackedDevice {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

impl FramebufferDevice for TrackedDevice {
    type Mapping = Vec<u8>;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn fixed_info(&mut self) -> Result<FixedInfo, DeviceErrors> {
        self.inner.fixed_info()
    }

    fn variable_info(&mut self) -> Result<VariableInfo, DeviceErrors> {
        self.inner.variable_info()
    }

    fn map(&mut self, size: usize) -> Result<Vec<u8>, DeviceErrors> {
        self.inner.map(size)
    }

    fn activate(&mut self) -> Result<(), DeviceErrors> {
        self.inner.activate()
    }
}

fn red_2x2() -> PixelBuffer {
    let file = encode_bmp(&vec![vec![[255, 0, 0]; 2]; 2], false, 0);
    BmpDecoder::new(&file).decode().unwrap()
}

fn show<D: FramebufferDevice>(device: D, image: PixelBuffer) -> Result<Display<D>, DeviceErrors> {
    let mut blit = BlitLoop::new(BlitOptions::default());
    blit.load_image(image)?;
    blit.attach(Display::open(device)?)?;
    blit.present()?;
    Ok(blit.into_display().unwrap())
}

#[test]
fn red_square_on_a_4x4_screen() {
    let display = show(MemoryFramebuffer::new(4, 4), red_2x2()).unwrap();
    let mapping = display.mapping();

    assert_eq!(display.geometry().line_length, 16);
    assert_eq!(mapping.len(), 64);

    for offset in (0..64).step_by(4) {
        let (x, y) = ((offset % 16) / 4, offset / 16);
        let expected = if x < 2 && y < 2 { 0xFFFF_0000 } else { 0 };

        assert_eq!(word_at(mapping, offset), expected, "pixel ({x},{y})");
    }
    assert_eq!(display.device().activations(), 1);
}

#[test]
fn memory_offset_does_not_move_pixels() {
    let plain = show(MemoryFramebuffer::new(4, 4), red_2x2()).unwrap();
    let offset = show(
        MemoryFramebuffer::new(4, 4).with_memory_offset(0xE000_0000),
        red_2x2()
    )
    .unwrap();

    assert_eq!(offset.geometry().memory_offset, 0xE000_0000);
    assert_eq!(plain.mapping(), offset.mapping());
}

#[test]
fn panned_screen_draws_at_the_visible_origin() {
    let device = MemoryFramebuffer::new(4, 4)
        .with_virtual_size(4, 8)
        .with_pan(0, 4);
    let display = show(device, red_2x2()).unwrap();
    let mapping = display.mapping();

    assert_eq!(word_at(mapping, 0), 0);
    assert_eq!(word_at(mapping, 4 * 16), 0xFFFF_0000);
    assert_eq!(word_at(mapping, 5 * 16 + 4), 0xFFFF_0000);
}

#[test]
fn device_layout_decides_channel_order() {
    let bgr = ChannelLayout {
        red:    ChannelField::new(0, 8),
        green:  ChannelField::new(8, 8),
        blue:   ChannelField::new(16, 8),
        transp: ChannelField::new(24, 8)
    };
    let display = show(MemoryFramebuffer::new(2, 2).with_layout(bgr), red_2x2()).unwrap();

    assert_eq!(word_at(display.mapping(), 0), 0xFF00_00FF);
}

#[test]
fn failures_release_the_device() {
    let failures = [
        SimulatedFailure::FixedQuery,
        SimulatedFailure::VariableQuery,
        SimulatedFailure::Map,
        SimulatedFailure::Activate
    ];
    for failure in failures {
        let (device, released) = TrackedDevice::new(MemoryFramebuffer::new(4, 4).with_failure(failure));

        assert!(show(device, red_2x2()).is_err(), "{failure:?}");
        assert_eq!(released.get(), 1, "{failure:?}");
    }
}

#[test]
fn too_large_releases_the_device() {
    let (device, released) = TrackedDevice::new(MemoryFramebuffer::new(1, 1));

    let result = show(device, red_2x2());
    assert!(matches!(
        result,
        Err(DeviceErrors::TooLarge {
            width: 2,
            height: 2,
            xres: 1,
            yres: 1
        })
    ));
    assert_eq!(released.get(), 1);
}

#[test]
fn unsupported_depth_is_rejected() {
    let device = MemoryFramebuffer::new(4, 4).with_bits_per_pixel(16);

    assert!(matches!(
        show(device, red_2x2()),
        Err(DeviceErrors::UnsupportedDepth(16))
    ));
}

#[test]
fn shutdown_releases_the_device() {
    let (device, released) = TrackedDevice::new(MemoryFramebuffer::new(4, 4));
    let options = BlitOptions::default().set_redraw_interval(Duration::from_millis(5));

    let mut blit = BlitLoop::new(options);
    blit.load_image(red_2x2()).unwrap();
    blit.attach(Display::open(device).unwrap()).unwrap();
    assert_eq!(blit.state(), BlitState::DeviceReady);

    let shutdown = ShutdownToken::new();
    let trigger = shutdown.clone();
    let waiter = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(30));
        trigger.trigger();
    });

    let display = blit.run(&shutdown).unwrap().unwrap();
    waiter.join().unwrap();

    assert_eq!(display.device().inner.activations(), 1);
    assert_eq!(released.get(), 0);
    drop(display);
    assert_eq!(released.get(), 1);
}
