/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Canny edge detector
//!
//! The detector runs the following stages
//! 1. Convert to grayscale
//! 2. Gaussian blur with `sigma` (1.4 by default)
//! 3. Sobel gradients
//! 4. Non maximum suppression along the gradient direction, quantized to 0, 45, 90 and 135 degrees
//! 5. Double threshold into strong and weak edges
//! 6. Hysteresis, weak edges survive only when 8-connected to a strong edge
use std::collections::VecDeque;

use zune_core::log::trace;

use crate::buffer::{RasterBuffer, Rgba};
use crate::errors::RasterErrors;
use crate::gaussian_blur::gaussian_blur_plane;
use crate::grayscale::luma_u8;
use crate::sobel::sobel_gradients;
use crate::traits::OperationsTrait;

/// Options for the canny edge detector
#[derive(Copy, Clone, Debug)]
pub struct CannyOptions {
    low:   f32,
    high:  f32,
    sigma: f32
}

impl Default for CannyOptions {
    fn default() -> Self {
        CannyOptions {
            low:   50.0,
            high:  150.0,
            sigma: 1.4
        }
    }
}

impl CannyOptions {
    /// Set the magnitude below which pixels are never edges
    #[must_use]
    pub fn set_low_threshold(mut self, low: f32) -> Self {
        self.low = low;
        self
    }
    /// Set the magnitude above which pixels are always edges
    #[must_use]
    pub fn set_high_threshold(mut self, high: f32) -> Self {
        self.high = high;
        self
    }
    /// Set the standard deviation of the smoothing blur
    #[must_use]
    pub fn set_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    #[must_use]
    pub const fn low_threshold(&self) -> f32 {
        self.low
    }

    #[must_use]
    pub const fn high_threshold(&self) -> f32 {
        self.high
    }

    #[must_use]
    pub const fn sigma(&self) -> f32 {
        self.sigma
    }
}

/// Replace an image with its canny edge map
///
/// Edges become opaque white, everything else opaque black
#[derive(Copy, Clone, Default)]
pub struct Canny {
    options: CannyOptions
}

impl Canny {
    #[must_use]
    pub fn new(low: f32, high: f32) -> Canny {
        Canny {
            options: CannyOptions::default()
                .set_low_threshold(low)
                .set_high_threshold(high)
        }
    }

    #[must_use]
    pub fn new_with_options(options: CannyOptions) -> Canny {
        Canny { options }
    }
}

impl OperationsTrait for Canny {
    fn name(&self) -> &'static str {
        "Canny"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        let edges = canny_edge_detection(buffer, &self.options)?;

        for (pix, edge) in buffer.pixels_mut().iter_mut().zip(edges) {
            *pix = if edge {
                Rgba::WHITE.to_array()
            } else {
                Rgba::BLACK.to_array()
            };
        }
        Ok(())
    }
}

/// Run canny on `buffer` returning a row major edge mask
///
/// # Errors
/// - [`RasterErrors::InvalidParameter`] if `low > high` or sigma is not positive
pub fn canny_edge_detection(
    buffer: &RasterBuffer, options: &CannyOptions
) -> Result<Vec<bool>, RasterErrors> {
    if options.low > options.high {
        return Err(RasterErrors::InvalidParameter(format!(
            "Canny low threshold {} is greater than high threshold {}",
            options.low, options.high
        )));
    }
    let (width, height) = buffer.dimensions();

    let gray: Vec<f32> = buffer
        .pixels()
        .iter()
        .map(|x| f32::from(luma_u8(x[0], x[1], x[2])))
        .collect();

    let blurred = gaussian_blur_plane(&gray, width, height, options.sigma)?;
    let gradients = sobel_gradients(&blurred, width, height);

    let suppressed = non_maximum_suppression(&gradients.magnitude, &gradients.direction, width, height);

    Ok(hysteresis(
        &suppressed,
        width,
        height,
        options.low,
        options.high
    ))
}

/// Neighbor offsets along the gradient for an angle in degrees
fn gradient_neighbors(angle: f32) -> [(isize, isize); 2] {
    let angle = angle.rem_euclid(180.0);

    if !(22.5..157.5).contains(&angle) {
        [(1, 0), (-1, 0)]
    } else if angle < 67.5 {
        [(1, 1), (-1, -1)]
    } else if angle < 112.5 {
        [(0, 1), (0, -1)]
    } else {
        [(-1, 1), (1, -1)]
    }
}

/// Keep only pixels whose magnitude is at least that of both neighbors along the gradient
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn non_maximum_suppression(
    magnitude: &[f32], direction: &[f32], width: usize, height: usize
) -> Vec<f32> {
    let mut out = vec![0.0; magnitude.len()];

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = y * width + x;
            let value = magnitude[idx];

            if value <= 0.0 {
                continue;
            }
            let is_max = gradient_neighbors(direction[idx].to_degrees())
                .iter()
                .all(|(dx, dy)| {
                    let nx = (x as isize + dx) as usize;
                    let ny = (y as isize + dy) as usize;
                    value >= magnitude[ny * width + nx]
                });

            if is_max {
                out[idx] = value;
            }
        }
    }
    out
}

/// Double threshold followed by a flood fill from strong pixels through weak ones
fn hysteresis(suppressed: &[f32], width: usize, height: usize, low: f32, high: f32) -> Vec<bool> {
    let mut edges = vec![false; suppressed.len()];
    let mut queue = VecDeque::new();

    for (i, value) in suppressed.iter().enumerate() {
        if *value > 0.0 && *value >= high {
            edges[i] = true;
            queue.push_back(i);
        }
    }
    trace!("Canny found {} strong pixels", queue.len());

    while let Some(idx) = queue.pop_front() {
        let (x, y) = (idx % width, idx / width);

        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                let n = ny * width + nx;
                let value = suppressed[n];

                if !edges[n] && value > 0.0 && value >= low {
                    edges[n] = true;
                    queue.push_back(n);
                }
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use crate::buffer::{RasterBuffer, Rgba};
    use crate::canny::{hysteresis, Canny, CannyOptions};
    use crate::errors::RasterErrors;
    use crate::traits::OperationsTrait;

    #[test]
    fn test_low_above_high_rejected() {
        let mut buffer = RasterBuffer::new(10, 10).unwrap();
        let result = Canny::new(200.0, 100.0).execute(&mut buffer);

        assert!(matches!(result, Err(RasterErrors::InvalidParameter(_))));
    }

    #[test]
    fn test_output_is_binary_and_finds_square() {
        let mut buffer = RasterBuffer::from_fn(40, 40, |x, y| {
            if (10..30).contains(&x) && (10..30).contains(&y) {
                Rgba::WHITE
            } else {
                Rgba::BLACK
            }
        })
        .unwrap();
        Canny::new_with_options(CannyOptions::default())
            .execute(&mut buffer)
            .unwrap();

        assert!(buffer
            .pixels()
            .iter()
            .all(|x| *x == [0, 0, 0, 255] || *x == [255; 4]));

        let edges = buffer.pixels().iter().filter(|x| x[0] == 255).count();
        assert!(edges > 40);
        // far from the square boundary nothing fires
        assert_eq!(buffer.get_pixel(20, 20).unwrap(), Rgba::BLACK);
        assert_eq!(buffer.get_pixel(2, 2).unwrap(), Rgba::BLACK);
    }

    #[test]
    fn test_hysteresis_is_transitive() {
        // strong at 0, then a chain of weak pixels, then an isolated weak pixel
        let row = [200.0, 60.0, 60.0, 60.0, 0.0, 60.0];
        let edges = hysteresis(&row, 6, 1, 50.0, 150.0);

        assert_eq!(edges, vec![true, true, true, true, false, false]);
    }
}
