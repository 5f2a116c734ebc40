/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Framebuffer display for decoded images
//!
//! - [`FramebufferDevice`] is the capability a display needs: geometry
//!   queries, mapping its memory and committing the mode.
//! - [`LinuxFramebuffer`] implements it over `/dev/fbN`, and
//!   [`MemoryFramebuffer`] over a plain buffer.
//! - [`Display`] owns a device and its mapping, dropping it unmaps the
//!   memory and closes the device.
//! - [`BlitLoop`] copies a frame into the mapping and keeps it on screen
//!   until a [`ShutdownToken`] fires.
pub use crate::blit::{BlitLoop, BlitOptions, BlitState};
pub use crate::device::{query_geometry, Display, FramebufferDevice};
pub use crate::errors::DeviceErrors;
pub use crate::geometry::{DeviceGeometry, FixedInfo, VariableInfo, BYTES_PER_PIXEL};
#[cfg(target_os = "linux")]
pub use crate::linux::LinuxFramebuffer;
pub use crate::memory::{MemoryFramebuffer, SimulatedFailure};
pub use crate::shutdown::{install_signal_handlers, ShutdownToken};

mod blit;
mod device;
mod errors;
mod geometry;
#[cfg(target_os = "linux")]
mod linux;
mod memory;
mod shutdown;
