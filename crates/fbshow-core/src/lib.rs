/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Core routines shared by the fbshow crates
//!
//! It currently contains
//!
//! - A bounds checked byte reader with little endian reads
//! - Decoder options
//! - The canonical pixel buffer handed from the decoder to the display,
//!   and channel layouts describing how a device packs its pixels
//!
//! This library is `#[no_std]` with `alloc` needed for defining `Vec`
//! which we need for storing decoded pixels.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod options;
pub mod pixels;
