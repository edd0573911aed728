/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Resize an image using bilinear interpolation
//!
//! Sampling positions are aligned on pixel centers, so
//! output pixel `x` samples the input at `(x + 0.5) * in_width / out_width - 0.5`.
use zune_core::log::trace;

use crate::buffer::{clamp_u8, RasterBuffer, CHANNELS};
use crate::errors::RasterErrors;
use crate::traits::OperationsTrait;

/// Resize an image to new dimensions
#[derive(Copy, Clone)]
pub struct Resize {
    new_width:  usize,
    new_height: usize
}

impl Resize {
    /// Create a new resize operation
    ///
    /// # Arguments
    /// - new_width: The new image width
    /// - new_height: The new image height
    #[must_use]
    pub fn new(new_width: usize, new_height: usize) -> Resize {
        Resize {
            new_width,
            new_height
        }
    }
}

impl OperationsTrait for Resize {
    fn name(&self) -> &'static str {
        "Resize"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        let out = resize_bilinear(buffer, self.new_width, self.new_height)?;
        *buffer = out;
        Ok(())
    }
}

/// Resize `buffer` into a new buffer
///
/// All four channels are interpolated. Resizing to the same dimensions returns a copy.
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if a new dimension is zero
pub fn resize_bilinear(
    buffer: &RasterBuffer, new_width: usize, new_height: usize
) -> Result<RasterBuffer, RasterErrors> {
    if new_width == 0 || new_height == 0 {
        return Err(RasterErrors::InvalidParameter(format!(
            "Cannot resize to {new_width}x{new_height}"
        )));
    }
    let (width, height) = buffer.dimensions();

    if (width, height) == (new_width, new_height) {
        return Ok(buffer.clone());
    }
    trace!("Resizing {}x{} to {}x{}", width, height, new_width, new_height);

    let x_ratio = width as f32 / new_width as f32;
    let y_ratio = height as f32 / new_height as f32;

    let x_samples: Vec<(usize, usize, f32)> = (0..new_width)
        .map(|x| sample_position(x, x_ratio, width))
        .collect();

    let src = buffer.as_bytes();
    let stride = width * CHANNELS;
    let mut out = Vec::with_capacity(new_width * new_height * CHANNELS);

    for y in 0..new_height {
        let (y0, y1, fy) = sample_position(y, y_ratio, height);

        let row0 = &src[y0 * stride..(y0 + 1) * stride];
        let row1 = &src[y1 * stride..(y1 + 1) * stride];

        for &(x0, x1, fx) in &x_samples {
            for c in 0..CHANNELS {
                let p00 = f32::from(row0[x0 * CHANNELS + c]);
                let p01 = f32::from(row0[x1 * CHANNELS + c]);
                let p10 = f32::from(row1[x0 * CHANNELS + c]);
                let p11 = f32::from(row1[x1 * CHANNELS + c]);

                let top = p00 + (p01 - p00) * fx;
                let bottom = p10 + (p11 - p10) * fx;

                out.push(clamp_u8(top + (bottom - top) * fy));
            }
        }
    }
    RasterBuffer::from_rgba(out, new_width, new_height)
}

/// Return the two source indices bracketing output index `pos` and the weight of the second
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_position(pos: usize, ratio: f32, len: usize) -> (usize, usize, f32) {
    let src = ((pos as f32 + 0.5) * ratio - 0.5).clamp(0.0, (len - 1) as f32);

    let lower = src.floor() as usize;
    let upper = (lower + 1).min(len - 1);

    (lower, upper, src - lower as f32)
}

#[cfg(test)]
mod tests {
    use crate::buffer::{RasterBuffer, Rgba};
    use crate::resize::resize_bilinear;

    #[test]
    fn test_resize_flat_color() {
        let buffer = RasterBuffer::fill(Rgba::new(10, 20, 30, 40), 7, 3).unwrap();
        let out = resize_bilinear(&buffer, 20, 13).unwrap();

        assert_eq!(out.dimensions(), (20, 13));
        assert!(out.pixels().iter().all(|x| *x == [10, 20, 30, 40]));
    }

    #[test]
    fn test_downscale_averages() {
        // 2x1 black/white down to 1x1 samples the midpoint
        let buffer = RasterBuffer::from_fn(2, 1, |x, _| Rgba::gray(if x == 0 { 0 } else { 254 }))
            .unwrap();
        let out = resize_bilinear(&buffer, 1, 1).unwrap();

        assert_eq!(out.get_pixel(0, 0).unwrap(), Rgba::gray(127));
    }

    #[test]
    fn test_zero_dimension() {
        let buffer = RasterBuffer::new(4, 4).unwrap();
        assert!(resize_bilinear(&buffer, 0, 4).is_err());
    }
}
