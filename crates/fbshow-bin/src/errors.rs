/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use fbshow_bmp::BmpDecoderErrors;
use fbshow_fbdev::DeviceErrors;

/// Every way displaying an image can fail, all of them fatal
pub enum FbshowErrors {
    /// The input file could not be opened or read
    FileIo(String, std::io::Error),
    Io(std::io::Error),
    Format(BmpDecoderErrors),
    Device(DeviceErrors),
    Json(serde_json::Error),
    GenericStatic(&'static str)
}

impl Debug for FbshowErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileIo(file, err) => {
                writeln!(f, "Could not open file {file}: {err}")
            }
            Self::Io(err) => {
                writeln!(f, "{err}")
            }
            Self::Format(err) => {
                writeln!(f, "Could not decode image: {err:?}")
            }
            Self::Device(err) => {
                writeln!(f, "{err:?}")
            }
            Self::Json(err) => {
                writeln!(f, "Could not serialize metadata: {err}")
            }
            Self::GenericStatic(err) => {
                writeln!(f, "{err}")
            }
        }
    }
}

impl From<std::io::Error> for FbshowErrors {
    fn from(value: std::io::Error) -> Self {
        FbshowErrors::Io(value)
    }
}

impl From<BmpDecoderErrors> for FbshowErrors {
    fn from(value: BmpDecoderErrors) -> Self {
        FbshowErrors::Format(value)
    }
}

impl From<DeviceErrors> for FbshowErrors {
    fn from(value: DeviceErrors) -> Self {
        FbshowErrors::Device(value)
    }
}

impl From<serde_json::Error> for FbshowErrors {
    fn from(value: serde_json::Error) -> Self {
        FbshowErrors::Json(value)
    }
}
