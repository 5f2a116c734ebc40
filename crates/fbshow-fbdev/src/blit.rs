/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Copying a decoded image onto a display and keeping it there
//!
//! ```text
//! Uninitialized --load_image--> ImageLoaded --attach--> DeviceReady --present--> Displaying
//! ```
//!
//! The first `present` commits the screen mode, later ones redraw the
//! same frame. `run` keeps redrawing at a fixed interval until shutdown
//! is requested and hands the display back so it can be released.
use std::time::Duration;

use fbshow_core::pixels::{ChannelLayout, PixelBuffer};
use log::{debug, info, trace};

use crate::device::{Display, FramebufferDevice};
use crate::geometry::BYTES_PER_PIXEL;
use crate::shutdown::ShutdownToken;
use crate::DeviceErrors;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BlitState {
    Uninitialized,
    ImageLoaded,
    DeviceReady,
    Displaying
}

/// Options for the display loop
#[derive(Copy, Clone, Debug)]
pub struct BlitOptions {
    /// Idle time between two redraws of the unchanged frame
    ///
    /// - Default value: 1 second
    redraw_interval:      Duration,
    /// Pack pixels with [`ChannelLayout::LEGACY`] instead of
    /// the layout the device reports
    ///
    /// - Default value: false
    legacy_channel_order: bool
}

impl Default for BlitOptions {
    fn default() -> Self {
        BlitOptions {
            redraw_interval:      Duration::from_millis(1000),
            legacy_channel_order: false
        }
    }
}

impl BlitOptions {
    pub const fn redraw_interval(&self) -> Duration {
        self.redraw_interval
    }

    pub const fn legacy_channel_order(&self) -> bool {
        self.legacy_channel_order
    }

    pub fn set_redraw_interval(mut self, interval: Duration) -> Self {
        self.redraw_interval = interval;
        self
    }

    pub fn set_legacy_channel_order(mut self, yes: bool) -> Self {
        self.legacy_channel_order = yes;
        self
    }
}

pub struct BlitLoop<D: FramebufferDevice> {
    state:        BlitState,
    options:      BlitOptions,
    image:        Option<PixelBuffer>,
    /// `image` packed in the attached display's layout
    frame:        Vec<u32>,
    display:      Option<Display<D>>,
    frames_drawn: u64
}

impl<D: FramebufferDevice> BlitLoop<D> {
    pub fn new(options: BlitOptions) -> BlitLoop<D> {
        BlitLoop {
            state: BlitState::Uninitialized,
            options,
            image: None,
            frame: Vec::new(),
            display: None,
            frames_drawn: 0
        }
    }

    pub const fn state(&self) -> BlitState {
        self.state
    }

    pub const fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn display(&self) -> Option<&Display<D>> {
        self.display.as_ref()
    }

    /// Give the display back, leaving the loop uninitialized
    pub fn into_display(mut self) -> Option<Display<D>> {
        self.display.take()
    }

    fn expect_state(&self, operation: &'static str, allowed: &[BlitState]) -> Result<(), DeviceErrors> {
        if !allowed.contains(&self.state) {
            return Err(DeviceErrors::InvalidState(operation, self.state));
        }
        Ok(())
    }

    /// Hold on to the image that will be displayed
    pub fn load_image(&mut self, image: PixelBuffer) -> Result<(), DeviceErrors> {
        self.expect_state("load an image", &[BlitState::Uninitialized])?;

        debug!("Loaded {}x{} image", image.width(), image.height());
        self.image = Some(image);
        self.state = BlitState::ImageLoaded;
        Ok(())
    }

    /// Take ownership of `display` and prepare the frame for it.
    ///
    /// On error the display is dropped, releasing the device.
    pub fn attach(&mut self, display: Display<D>) -> Result<(), DeviceErrors> {
        self.expect_state("attach a display", &[BlitState::ImageLoaded])?;

        let image = self
            .image
            .as_ref()
            .ok_or(DeviceErrors::InvalidState("attach a display", self.state))?;
        let (width, height) = image.dimensions();
        let geometry = display.geometry();

        geometry.validate(width, height)?;
        geometry.check_drawable(width, height)?;

        let layout = if self.options.legacy_channel_order {
            ChannelLayout::LEGACY
        } else {
            geometry.layout
        };
        debug!("Packing pixels with {:?}", layout);

        self.frame = image.pack(&layout);
        self.display = Some(display);
        self.state = BlitState::DeviceReady;
        Ok(())
    }

    /// Clear the mapping and copy the frame into it
    fn draw(&mut self) -> Result<(), DeviceErrors> {
        let (width, height) = match &self.image {
            Some(image) => image.dimensions(),
            None => return Err(DeviceErrors::InvalidState("draw", self.state))
        };
        let display = self
            .display
            .as_mut()
            .ok_or(DeviceErrors::InvalidState("draw", self.state))?;
        let geometry = display.geometry().clone();

        display.clear();

        if width == 0 {
            return Ok(());
        }
        let mapping = display.mapping_mut();

        for (y, row) in self.frame.chunks_exact(width).take(height).enumerate() {
            let start = geometry.pixel_offset(0, y);
            let end = start + width * BYTES_PER_PIXEL;

            for (dest, pixel) in mapping[start..end]
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .zip(row)
            {
                dest.copy_from_slice(&pixel.to_ne_bytes());
            }
        }
        self.frames_drawn += 1;
        trace!("Frame {} drawn", self.frames_drawn);

        Ok(())
    }

    /// Draw the frame, committing the screen mode after the first one
    pub fn present(&mut self) -> Result<(), DeviceErrors> {
        self.expect_state(
            "present",
            &[BlitState::DeviceReady, BlitState::Displaying]
        )?;
        self.draw()?;

        if self.state == BlitState::DeviceReady {
            if let Some(display) = self.display.as_mut() {
                display.activate()?;
            }
            self.state = BlitState::Displaying;
            info!("Image on screen");
        }
        Ok(())
    }

    /// Present, then redraw every `redraw_interval` until `shutdown`
    /// fires.
    ///
    /// Returns the display so the caller decides when it is released.
    pub fn run(mut self, shutdown: &ShutdownToken) -> Result<Option<Display<D>>, DeviceErrors> {
        self.present()?;

        while !shutdown.wait_timeout(self.options.redraw_interval) {
            self.present()?;
        }
        info!("Shutdown requested after {} frames", self.frames_drawn);

        Ok(self.into_display())
    }
}
