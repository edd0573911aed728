/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Gaussian blur
//!
//! Two flavours are provided
//! - [`GaussianBlur`]: an operation that convolves an RGBA image with a 2D kernel
//! - [`gaussian_blur_plane`]: a separable blur on a single `f32` plane, used by the
//!   edge and keypoint detectors which work on luma directly
use crate::buffer::RasterBuffer;
use crate::cancel::CancelToken;
use crate::convolve::{convolve, Kernel};
use crate::errors::RasterErrors;
use crate::traits::OperationsTrait;

/// Blur an image with a gaussian kernel
///
/// The kernel is `2*ceil(3*radius)+1` pixels wide, `radius` is used as the standard deviation.
#[derive(Clone)]
pub struct GaussianBlur {
    radius: f32,
    cancel: CancelToken
}

impl GaussianBlur {
    /// Create a new gaussian blur operation
    ///
    /// # Arguments
    /// - radius: Standard deviation of the gaussian, must be greater than zero
    #[must_use]
    pub fn new(radius: f32) -> GaussianBlur {
        GaussianBlur {
            radius,
            cancel: CancelToken::default()
        }
    }

    #[must_use]
    pub fn set_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }
}

impl OperationsTrait for GaussianBlur {
    fn name(&self) -> &'static str {
        "Gaussian blur"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        let kernel = gaussian_kernel(self.radius)?;

        *buffer = convolve(buffer, &kernel, 1.0, &self.cancel)?;
        Ok(())
    }
}

/// Size of the kernel used for `radius`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn kernel_size(radius: f32) -> usize {
    2 * (3.0 * radius).ceil() as usize + 1
}

fn check_radius(radius: f32) -> Result<(), RasterErrors> {
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(RasterErrors::InvalidParameter(format!(
            "Gaussian radius must be positive, found {radius}"
        )));
    }
    Ok(())
}

/// Create a normalized 2D gaussian kernel
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `radius <= 0`
pub fn gaussian_kernel(radius: f32) -> Result<Kernel, RasterErrors> {
    check_radius(radius)?;

    let size = kernel_size(radius);
    let weights_1d = gaussian_weights_1d(radius, size);

    let mut weights = Vec::with_capacity(size * size);

    for wy in &weights_1d {
        for wx in &weights_1d {
            weights.push(wy * wx);
        }
    }
    let sum: f32 = weights.iter().sum();
    weights.iter_mut().for_each(|x| *x /= sum);

    Kernel::new(weights, size, size)
}

/// Create normalized 1D gaussian weights
fn gaussian_weights_1d(sigma: f32, size: usize) -> Vec<f32> {
    let half = (size / 2) as f32;
    let denominator = 2.0 * sigma * sigma;

    let mut weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - half;
            (-(d * d) / denominator).exp()
        })
        .collect();

    let sum: f32 = weights.iter().sum();
    weights.iter_mut().for_each(|x| *x /= sum);
    weights
}

/// Blur a single plane of floats with a separable gaussian
///
/// Edges are replicated. The input is not modified.
///
/// # Arguments
/// - plane: Row major samples, `width*height` long
/// - sigma: Standard deviation of the gaussian
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `sigma <= 0`
pub fn gaussian_blur_plane(
    plane: &[f32], width: usize, height: usize, sigma: f32
) -> Result<Vec<f32>, RasterErrors> {
    check_radius(sigma)?;

    if plane.len() != width * height {
        return Err(RasterErrors::DimensionMismatch(format!(
            "Plane of {} samples is not {width}x{height}",
            plane.len()
        )));
    }
    let size = kernel_size(sigma);
    let half = size / 2;
    let weights = gaussian_weights_1d(sigma, size);

    let mut scratch = vec![0.0_f32; plane.len()];
    let mut out = vec![0.0_f32; plane.len()];

    // horizontal pass
    for (in_row, out_row) in plane
        .chunks_exact(width)
        .zip(scratch.chunks_exact_mut(width))
    {
        for (x, value) in out_row.iter_mut().enumerate() {
            *value = weights
                .iter()
                .enumerate()
                .map(|(k, w)| w * in_row[(x + k).saturating_sub(half).min(width - 1)])
                .sum();
        }
    }
    // vertical pass
    for y in 0..height {
        for x in 0..width {
            out[y * width + x] = weights
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let sy = (y + k).saturating_sub(half).min(height - 1);
                    w * scratch[sy * width + x]
                })
                .sum();
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use crate::buffer::{RasterBuffer, Rgba};
    use crate::errors::RasterErrors;
    use crate::gaussian_blur::{gaussian_blur_plane, gaussian_kernel, GaussianBlur};
    use crate::traits::OperationsTrait;

    #[test]
    fn test_kernel_sums_to_one() {
        for radius in [0.5, 1.0, 1.4, 2.0, 3.3] {
            let kernel = gaussian_kernel(radius).unwrap();
            let sum: f32 = kernel.weights().iter().sum();

            assert!((sum - 1.0).abs() < 1e-4, "{radius} {sum}");
        }
    }

    #[test]
    fn test_kernel_size() {
        assert_eq!(gaussian_kernel(1.0).unwrap().dimensions(), (7, 7));
        assert_eq!(gaussian_kernel(1.4).unwrap().dimensions(), (11, 11));
    }

    #[test]
    fn test_non_positive_radius() {
        assert!(matches!(
            gaussian_kernel(0.0),
            Err(RasterErrors::InvalidParameter(_))
        ));
        let mut buffer = RasterBuffer::new(3, 3).unwrap();
        assert!(GaussianBlur::new(-1.0).execute(&mut buffer).is_err());
    }

    #[test]
    fn test_blur_smooths_step() {
        let mut buffer = RasterBuffer::from_fn(20, 5, |x, _| {
            if x < 10 {
                Rgba::gray(0)
            } else {
                Rgba::gray(255)
            }
        })
        .unwrap();
        GaussianBlur::new(1.0).execute(&mut buffer).unwrap();

        let left = buffer.get_pixel(9, 2).unwrap().r;
        let right = buffer.get_pixel(10, 2).unwrap().r;

        assert!(left > 0 && left < 128);
        assert!(right > 128 && right < 255);
    }

    #[test]
    fn test_plane_blur_preserves_constant() {
        let plane = vec![42.0; 12 * 9];
        let out = gaussian_blur_plane(&plane, 12, 9, 1.6).unwrap();

        assert!(out.iter().all(|x| (x - 42.0).abs() < 1e-3));
    }
}
