/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Histogram equalization
//!
//! Spreads the luma of an image over the full `[0,255]` range by mapping
//! every luma level through the cumulative histogram.
use zune_core::log::trace;

use crate::buffer::RasterBuffer;
use crate::errors::RasterErrors;
use crate::grayscale::luma_u8;
use crate::traits::OperationsTrait;

/// Equalize the luma histogram of an image
///
/// The output is gray, alpha is kept.
/// An image where every pixel has the same luma is left untouched.
#[derive(Default, Copy, Clone)]
pub struct HistogramEqualization;

impl HistogramEqualization {
    #[must_use]
    pub fn new() -> HistogramEqualization {
        HistogramEqualization
    }
}

impl OperationsTrait for HistogramEqualization {
    fn name(&self) -> &'static str {
        "Histogram Equalization"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        let pixels = buffer.pixels_mut();

        let Some(lut) = equalization_lut(pixels) else {
            trace!("Single luma level, skipping equalization");
            return Ok(());
        };

        for pix in pixels.iter_mut() {
            let level = lut[usize::from(luma_u8(pix[0], pix[1], pix[2]))];

            pix[0] = level;
            pix[1] = level;
            pix[2] = level;
        }
        Ok(())
    }
}

/// Build the lookup table mapping input luma to equalized luma
///
/// Returns `None` when all pixels share one luma level
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn equalization_lut(pixels: &[[u8; 4]]) -> Option<[u8; 256]> {
    let mut histogram = [0_usize; 256];

    for pix in pixels {
        histogram[usize::from(luma_u8(pix[0], pix[1], pix[2]))] += 1;
    }

    let mut cdf = [0_usize; 256];
    let mut running = 0;

    for (count, c) in histogram.iter().zip(cdf.iter_mut()) {
        running += count;
        *c = running;
    }
    let total = pixels.len();
    let cdf_min = cdf.iter().copied().find(|x| *x != 0).unwrap_or(0);

    if total == cdf_min {
        return None;
    }
    let denominator = (total - cdf_min) as f64;
    let mut lut = [0_u8; 256];

    for (value, c) in lut.iter_mut().zip(cdf.iter()) {
        let scaled = (c.saturating_sub(cdf_min) as f64) / denominator * 255.0;
        *value = scaled.round().clamp(0.0, 255.0) as u8;
    }
    Some(lut)
}

#[cfg(test)]
mod tests {
    use crate::buffer::{RasterBuffer, Rgba};
    use crate::equalize::HistogramEqualization;
    use crate::traits::OperationsTrait;

    #[test]
    fn test_two_levels_stretch_to_extremes() {
        let mut buffer = RasterBuffer::from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgba::gray(100)
            } else {
                Rgba::gray(110)
            }
        })
        .unwrap();
        HistogramEqualization::new().execute(&mut buffer).unwrap();

        assert_eq!(buffer.get_pixel(0, 0).unwrap(), Rgba::gray(0));
        assert_eq!(buffer.get_pixel(9, 9).unwrap(), Rgba::gray(255));
    }

    #[test]
    fn test_uniform_is_noop() {
        let buffer = RasterBuffer::fill(Rgba::new(10, 200, 30, 128), 8, 8).unwrap();
        let result = HistogramEqualization::new()
            .clone_and_execute(&buffer)
            .unwrap();

        assert_eq!(result, buffer);
    }
}
