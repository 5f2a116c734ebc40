/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use fbshow_bmp::{row_stride, ImageHeader};
use fbshow_core::pixels::ChannelField;
use fbshow_fbdev::DeviceGeometry;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub struct Metadata<'a> {
    file:   &'a Path,
    size:   u64,
    header: &'a ImageHeader
}

impl<'a> Metadata<'a> {
    pub fn new(file: &'a Path, size: u64, header: &'a ImageHeader) -> Metadata<'a> {
        Metadata { file, size, header }
    }
}

impl<'a> Serialize for Metadata<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Metadata", 9)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("width", &self.header.width)?;
        state.serialize_field("height", &self.header.height)?;
        state.serialize_field("depth", &self.header.depth)?;
        state.serialize_field("compression", &format!("{:?}", self.header.compression))?;
        state.serialize_field("top_down", &self.header.top_down)?;
        state.serialize_field("pixel_offset", &self.header.pixel_offset)?;
        state.serialize_field("row_stride", &row_stride(self.header.width))?;

        state.end()
    }
}

struct Field(ChannelField);

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("ChannelField", 2)?;

        state.serialize_field("offset", &self.0.offset)?;
        state.serialize_field("length", &self.0.length)?;

        state.end()
    }
}

pub struct DeviceInfo<'a> {
    device:   &'a Path,
    geometry: &'a DeviceGeometry
}

impl<'a> DeviceInfo<'a> {
    pub fn new(device: &'a Path, geometry: &'a DeviceGeometry) -> DeviceInfo<'a> {
        DeviceInfo { device, geometry }
    }
}

impl<'a> Serialize for DeviceInfo<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let geometry = self.geometry;
        let mut state = serializer.serialize_struct("DeviceInfo", 16)?;

        state.serialize_field("device", &self.device.to_string_lossy())?;
        state.serialize_field("id", &geometry.id)?;
        state.serialize_field("xres", &geometry.xres)?;
        state.serialize_field("yres", &geometry.yres)?;
        state.serialize_field("xres_virtual", &geometry.xres_virtual)?;
        state.serialize_field("yres_virtual", &geometry.yres_virtual)?;
        state.serialize_field("xoffset", &geometry.xoffset)?;
        state.serialize_field("yoffset", &geometry.yoffset)?;
        state.serialize_field("line_length", &geometry.line_length)?;
        state.serialize_field("bits_per_pixel", &geometry.bits_per_pixel)?;
        state.serialize_field("red", &Field(geometry.layout.red))?;
        state.serialize_field("green", &Field(geometry.layout.green))?;
        state.serialize_field("blue", &Field(geometry.layout.blue))?;
        state.serialize_field("transp", &Field(geometry.layout.transp))?;
        state.serialize_field("memory_offset", &geometry.memory_offset)?;
        state.serialize_field("memory_size", &geometry.memory_size)?;

        state.end()
    }
}
