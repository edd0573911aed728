/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! 2D convolution on images
//!
//! Kernels of any odd width and height are supported, pixels outside the
//! image are replaced by the nearest edge pixel.
//!
//! The intermediate calculations are carried in `f32`, results are rounded
//! and then clamped to `[0,255]`.
//!
//! With the `threads` feature rows are split into bands that run on separate
//! threads, the output is identical to the single threaded path.
use zune_core::log::trace;

use crate::buffer::{clamp_u8, RasterBuffer, CHANNELS};
use crate::cancel::CancelToken;
use crate::errors::RasterErrors;
use crate::traits::OperationsTrait;

/// A convolution kernel
///
/// Weights are stored in row major order
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    width:   usize,
    height:  usize,
    weights: Vec<f32>
}

impl Kernel {
    /// Create a new kernel
    ///
    /// # Errors
    /// - [`RasterErrors::InvalidParameter`] if a dimension is even or zero
    /// - [`RasterErrors::DimensionMismatch`] if `weights.len() != width*height`
    pub fn new(weights: Vec<f32>, width: usize, height: usize) -> Result<Kernel, RasterErrors> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(RasterErrors::InvalidParameter(format!(
                "Kernel dimensions must be odd, found {width}x{height}"
            )));
        }
        if weights.len() != width * height {
            return Err(RasterErrors::DimensionMismatch(format!(
                "A {width}x{height} kernel needs {} weights but {} were given",
                width * height,
                weights.len()
            )));
        }
        Ok(Kernel {
            width,
            height,
            weights
        })
    }

    /// Create a square kernel, the size is derived from the number of weights
    ///
    /// # Errors
    /// [`RasterErrors::InvalidParameter`] if the number of weights is not an odd square
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn square(weights: Vec<f32>) -> Result<Kernel, RasterErrors> {
        let size = (weights.len() as f64).sqrt().round() as usize;

        if size * size != weights.len() {
            return Err(RasterErrors::InvalidParameter(format!(
                "{} weights do not form a square kernel",
                weights.len()
            )));
        }
        Kernel::new(weights, size, size)
    }

    /// A kernel that leaves the image unchanged
    ///
    /// # Errors
    /// [`RasterErrors::InvalidParameter`] if `size` is even
    pub fn identity(size: usize) -> Result<Kernel, RasterErrors> {
        let mut weights = vec![0.0; size * size];

        if let Some(center) = weights.get_mut((size * size) / 2) {
            *center = 1.0;
        }
        Kernel::new(weights, size, size)
    }

    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Convolve an image with a kernel
///
/// # Alpha channel
/// - Alpha channel is ignored
///
/// # Example
/// - Sharpen an image
/// ```
/// use zune_raster::buffer::{RasterBuffer, Rgba};
/// use zune_raster::convolve::{Convolve, Kernel};
/// use zune_raster::errors::RasterErrors;
/// use zune_raster::traits::OperationsTrait;
///
/// let kernel = Kernel::square(vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0])?;
/// let mut buffer = RasterBuffer::fill(Rgba::gray(100), 20, 20)?;
///
/// Convolve::new(kernel).execute(&mut buffer)?;
/// # Ok::<(), RasterErrors>(())
/// ```
#[derive(Clone)]
pub struct Convolve {
    kernel: Kernel,
    scale:  f32,
    cancel: CancelToken
}

impl Convolve {
    #[must_use]
    pub fn new(kernel: Kernel) -> Convolve {
        Convolve {
            kernel,
            scale: 1.0,
            cancel: CancelToken::default()
        }
    }
    /// Set a value every convolution sum is multiplied by
    #[must_use]
    pub fn set_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
    /// Set a token that can abort the operation between rows
    #[must_use]
    pub fn set_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }
}

impl OperationsTrait for Convolve {
    fn name(&self) -> &'static str {
        "2D convolution"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        let out = convolve(buffer, &self.kernel, self.scale, &self.cancel)?;
        *buffer = out;
        Ok(())
    }
}

/// Convolve `buffer` with `kernel` returning a new buffer
///
/// # Arguments
/// - buffer: Source image, left untouched
/// - kernel: The weights
/// - scale: Multiplier applied to every sum
/// - cancel: Token checked before every row
///
/// # Errors
/// [`RasterErrors::Cancelled`] if the token fires, no partial output is returned
pub fn convolve(
    buffer: &RasterBuffer, kernel: &Kernel, scale: f32, cancel: &CancelToken
) -> Result<RasterBuffer, RasterErrors> {
    let (width, height) = buffer.dimensions();
    let src = buffer.as_bytes();
    let stride = width * CHANNELS;

    let mut out = vec![0_u8; src.len()];

    #[cfg(feature = "threads")]
    {
        let threads = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1);
        let rows_per_band = height.div_ceil(threads).max(1);

        trace!(
            "Running convolve in multithreaded mode, {} rows per thread",
            rows_per_band
        );

        std::thread::scope(|s| {
            let mut results = vec![];

            for (band, out_band) in out.chunks_mut(rows_per_band * stride).enumerate() {
                let handle = s.spawn(move || -> Result<(), RasterErrors> {
                    let start_row = band * rows_per_band;

                    for (i, out_row) in out_band.chunks_exact_mut(stride).enumerate() {
                        cancel.check("2D convolution")?;
                        convolve_row(src, out_row, width, height, start_row + i, kernel, scale);
                    }
                    Ok(())
                });
                results.push(handle);
            }
            results
                .into_iter()
                .map(|x| {
                    x.join()
                        .unwrap_or(Err(RasterErrors::GenericStr("Convolve thread panicked")))
                })
                .collect::<Result<Vec<()>, RasterErrors>>()
        })?;
    }
    #[cfg(not(feature = "threads"))]
    {
        trace!("Running convolve in single threaded mode");

        for (y, out_row) in out.chunks_exact_mut(stride).enumerate() {
            cancel.check("2D convolution")?;
            convolve_row(src, out_row, width, height, y, kernel, scale);
        }
    }

    RasterBuffer::from_rgba(out, width, height)
}

/// Compute output row `y`
fn convolve_row(
    src: &[u8], out_row: &mut [u8], width: usize, height: usize, y: usize, kernel: &Kernel,
    scale: f32
) {
    let stride = width * CHANNELS;
    let half_w = kernel.width / 2;
    let half_h = kernel.height / 2;

    for x in 0..width {
        let mut sums = [0.0_f32; 3];

        for (ky, weights) in kernel.weights.chunks_exact(kernel.width).enumerate() {
            let sy = clamp_index(y, ky, half_h, height);
            let row = &src[sy * stride..(sy + 1) * stride];

            for (kx, weight) in weights.iter().enumerate() {
                let sx = clamp_index(x, kx, half_w, width);
                let pix = &row[sx * CHANNELS..sx * CHANNELS + 3];

                for (sum, value) in sums.iter_mut().zip(pix) {
                    *sum += f32::from(*value) * weight;
                }
            }
        }
        let out = &mut out_row[x * CHANNELS..(x + 1) * CHANNELS];

        for (o, sum) in out.iter_mut().zip(sums) {
            *o = clamp_u8(sum * scale);
        }
        out[3] = src[y * stride + x * CHANNELS + 3];
    }
}

/// Source index of kernel tap `k` around `pos`, replicating the edges
#[inline]
fn clamp_index(pos: usize, k: usize, half: usize, len: usize) -> usize {
    (pos + k).saturating_sub(half).min(len - 1)
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};

    use crate::buffer::{RasterBuffer, Rgba};
    use crate::cancel::CancelToken;
    use crate::convolve::{convolve, Convolve, Kernel};
    use crate::errors::RasterErrors;
    use crate::traits::OperationsTrait;

    #[test]
    fn test_even_kernel_rejected() {
        assert!(matches!(
            Kernel::new(vec![1.0; 4], 2, 2),
            Err(RasterErrors::InvalidParameter(_))
        ));
        assert!(Kernel::new(vec![1.0; 3], 3, 3).is_err());
        assert!(Kernel::new(vec![1.0; 15], 5, 3).is_ok());
    }

    #[test]
    fn test_identity_is_noop() {
        let mut rng = WyRand::new_seed(42);
        let mut pixels = vec![0_u8; 31 * 17 * 4];
        rng.fill(&mut pixels);

        let buffer = RasterBuffer::from_rgba(pixels, 31, 17).unwrap();

        for size in [1, 3, 5] {
            let kernel = Kernel::identity(size).unwrap();
            let out = Convolve::new(kernel).clone_and_execute(&buffer).unwrap();
            assert_eq!(out, buffer);
        }
    }

    #[test]
    fn test_box_blur_of_flat_image() {
        let buffer = RasterBuffer::fill(Rgba::new(90, 60, 30, 10), 9, 9).unwrap();
        let kernel = Kernel::square(vec![1.0; 9]).unwrap();

        let out = Convolve::new(kernel)
            .set_scale(1.0 / 9.0)
            .clone_and_execute(&buffer)
            .unwrap();

        // edge replication keeps flat images flat, alpha is never touched
        assert!(out.pixels().iter().all(|x| *x == [90, 60, 30, 10]));
    }

    #[test]
    fn test_results_are_clamped() {
        let buffer = RasterBuffer::fill(Rgba::gray(200), 4, 4).unwrap();
        let kernel = Kernel::square(vec![2.0]).unwrap();

        let out = convolve(&buffer, &kernel, 1.0, &CancelToken::default()).unwrap();
        assert_eq!(out.get_pixel(1, 1).unwrap(), Rgba::gray(255));
    }

    #[test]
    fn test_cancelled_convolution() {
        let buffer = RasterBuffer::new(8, 8).unwrap();
        let token = CancelToken::new();
        token.cancel();

        let result = convolve(&buffer, &Kernel::identity(3).unwrap(), 1.0, &token);
        assert!(matches!(result, Err(RasterErrors::Cancelled(_))));
    }
}

#[cfg(feature = "benchmarks")]
#[cfg(test)]
mod benchmarks {
    extern crate test;

    use crate::buffer::{RasterBuffer, Rgba};
    use crate::cancel::CancelToken;
    use crate::convolve::{convolve, Kernel};

    #[bench]
    fn convolve_5x5_bench(b: &mut test::Bencher) {
        let buffer = RasterBuffer::fill(Rgba::gray(128), 800, 800).unwrap();
        let kernel = Kernel::square(vec![1.0 / 25.0; 25]).unwrap();
        let token = CancelToken::default();

        b.iter(|| {
            let _ = convolve(&buffer, &kernel, 1.0, &token);
        });
    }
}
