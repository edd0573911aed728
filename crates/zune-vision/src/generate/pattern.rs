/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Periodic test patterns
use zune_raster::buffer::{clamp_u8, RasterBuffer, Rgba};
use zune_raster::errors::RasterErrors;

/// Alternating square cells, the top left cell is `first`
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `cell_size` or a dimension is zero
pub fn checkerboard(
    width: usize, height: usize, cell_size: usize, first: Rgba, second: Rgba
) -> Result<RasterBuffer, RasterErrors> {
    if cell_size == 0 {
        return Err(RasterErrors::InvalidParameter(
            "Checkerboard cell size must be at least 1".to_string()
        ));
    }
    RasterBuffer::from_fn(width, height, |x, y| {
        if (x / cell_size + y / cell_size) % 2 == 0 {
            first
        } else {
            second
        }
    })
}

/// Gray interference of two sine waves
///
/// `127.5 * (1 + (sin(fx * x) + sin(fy * y)) / 2)`, frequencies are in radians per pixel
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if a dimension is zero
#[allow(clippy::cast_possible_truncation)]
pub fn sine_pattern(
    width: usize, height: usize, fx: f64, fy: f64
) -> Result<RasterBuffer, RasterErrors> {
    RasterBuffer::from_fn(width, height, |x, y| {
        let value = 127.5 * (1.0 + ((fx * x as f64).sin() + (fy * y as f64).sin()) / 2.0);
        Rgba::gray(clamp_u8(value as f32))
    })
}
