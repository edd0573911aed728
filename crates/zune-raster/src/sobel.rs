/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sobel derivative filter
use crate::buffer::{clamp_u8, RasterBuffer};
use crate::errors::RasterErrors;
use crate::traits::OperationsTrait;

/// Gradient magnitude and direction of an image
///
/// Both planes are row major and `width*height` long, the outermost ring of
/// pixels has a magnitude and direction of zero.
#[derive(Clone, Debug)]
pub struct SobelGradients {
    pub width:     usize,
    pub height:    usize,
    /// `sqrt(gx² + gy²)`
    pub magnitude: Vec<f32>,
    /// `atan2(gy, gx)` in radians
    pub direction: Vec<f32>
}

/// Perform a sobel image derivative.
///
/// The gradients are computed on the luma of the image and the magnitude,
/// clamped to `[0,255]`, is written to the color channels. Alpha is kept.
///
/// The matrix for sobel is
///
/// Gx matrix
/// ```text
///   -1, 0, 1,
///   -2, 0, 2,
///   -1, 0, 1
/// ```
/// Gy matrix
/// ```text
/// -1,-2,-1,
///  0, 0, 0,
///  1, 2, 1
/// ```
#[derive(Default, Copy, Clone)]
pub struct Sobel;

impl Sobel {
    #[must_use]
    pub fn new() -> Sobel {
        Self
    }
}

impl OperationsTrait for Sobel {
    fn name(&self) -> &'static str {
        "Sobel"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        let gradients = sobel_edge_detection(buffer);

        for (pix, magnitude) in buffer.pixels_mut().iter_mut().zip(&gradients.magnitude) {
            let value = clamp_u8(*magnitude);

            pix[0] = value;
            pix[1] = value;
            pix[2] = value;
        }
        Ok(())
    }
}

/// Compute sobel gradients of the luma of `buffer`
#[must_use]
pub fn sobel_edge_detection(buffer: &RasterBuffer) -> SobelGradients {
    let (width, height) = buffer.dimensions();
    sobel_gradients(&buffer.luma_plane(), width, height)
}

/// Compute sobel gradients of a single plane
///
/// # Arguments
/// - plane: Row major samples, must be `width*height` long
#[must_use]
pub fn sobel_gradients(plane: &[f32], width: usize, height: usize) -> SobelGradients {
    let mut magnitude = vec![0.0; width * height];
    let mut direction = vec![0.0; width * height];

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let p = |dx: usize, dy: usize| plane[(y + dy - 1) * width + x + dx - 1];

            // each side is summed separately so identical sides cancel exactly
            let gx = (p(2, 0) + 2.0 * p(2, 1) + p(2, 2)) - (p(0, 0) + 2.0 * p(0, 1) + p(0, 2));
            let gy = (p(0, 2) + 2.0 * p(1, 2) + p(2, 2)) - (p(0, 0) + 2.0 * p(1, 0) + p(2, 0));

            magnitude[y * width + x] = (gx * gx + gy * gy).sqrt();
            direction[y * width + x] = gy.atan2(gx);
        }
    }
    SobelGradients {
        width,
        height,
        magnitude,
        direction
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::{RasterBuffer, Rgba};
    use crate::sobel::sobel_edge_detection;

    #[test]
    fn test_vertical_edge() {
        let buffer = RasterBuffer::from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgba::gray(0)
            } else {
                Rgba::gray(100)
            }
        })
        .unwrap();
        let gradients = sobel_edge_detection(&buffer);

        // gx = 4*100 across the step, gy is zero
        let at = |x: usize, y: usize| gradients.magnitude[y * 10 + x];
        assert!((at(4, 5) - 400.0).abs() < 0.1);
        assert!(gradients.direction[5 * 10 + 4].abs() < 1e-5);
        assert_eq!(at(2, 5), 0.0);
        // borders stay zero
        assert_eq!(at(0, 5), 0.0);
        assert_eq!(at(5, 0), 0.0);
    }
}
