/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Parse a `WIDTHxHEIGHT` pair such as `1920x1080`
pub fn parse_dimensions(value: &str) -> Result<(usize, usize), String> {
    let (width, height) = value
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("Expected WIDTHxHEIGHT, found {value}"))?;

    let width = width
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("Invalid width {width:?}: {e}"))?;
    let height = height
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("Invalid height {height:?}: {e}"))?;

    if width == 0 || height == 0 {
        return Err("Dimensions must be greater than zero".to_string());
    }
    Ok((width, height))
}
