/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Decoder options
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    max_width:   usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    max_height:  usize,
    /// Reject files whose signature or layout is off
    /// instead of warning and carrying on.
    ///
    /// - Default value: true
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: true
        }
    }
}

impl DecoderOptions {
    /// Options tuned for the command line, tolerant of
    /// files with a damaged signature
    pub fn new_lenient() -> DecoderOptions {
        DecoderOptions::default().set_strict_mode(false)
    }

    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// In strict mode a missing `BM` signature is an error, otherwise
    /// it is only logged.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
