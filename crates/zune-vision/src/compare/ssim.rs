/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Structural similarity index
use zune_core::log::trace;
use zune_raster::buffer::RasterBuffer;
use zune_raster::errors::RasterErrors;
use zune_raster::grayscale::luma_u8;
use zune_raster::resize::resize_bilinear;

/// `(0.01 * 255)²`
const C1: f64 = 6.5025;
/// `(0.03 * 255)²`
const C2: f64 = 58.5225;

/// Compute the mean SSIM of two images
///
/// Both images are converted to grayscale, the second is resized to the
/// dimensions of the first when they differ. The index is computed on
/// non overlapping `window x window` blocks, partial blocks at the right
/// and bottom edges are skipped. A window larger than the image is clipped to it.
///
/// # Arguments
/// - window: Block size, 11 is customary
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `window` is zero
pub fn ssim(img1: &RasterBuffer, img2: &RasterBuffer, window: usize) -> Result<f64, RasterErrors> {
    if window == 0 {
        return Err(RasterErrors::InvalidParameter(
            "SSIM window must be greater than zero".to_string()
        ));
    }
    let (width, height) = img1.dimensions();

    let resized;
    let img2 = if img2.dimensions() == (width, height) {
        img2
    } else {
        trace!("Resizing second image to {}x{} for SSIM", width, height);
        resized = resize_bilinear(img2, width, height)?;
        &resized
    };
    let a = gray_plane(img1);
    let b = gray_plane(img2);

    let block_w = window.min(width);
    let block_h = window.min(height);
    let n = (block_w * block_h) as f64;

    let mut total = 0.0;
    let mut blocks = 0_usize;

    for by in (0..=height - block_h).step_by(block_h) {
        for bx in (0..=width - block_w).step_by(block_w) {
            let mut sum_a = 0.0;
            let mut sum_b = 0.0;

            for y in by..by + block_h {
                for x in bx..bx + block_w {
                    sum_a += a[y * width + x];
                    sum_b += b[y * width + x];
                }
            }
            let mean_a = sum_a / n;
            let mean_b = sum_b / n;

            let mut var_a = 0.0;
            let mut var_b = 0.0;
            let mut covariance = 0.0;

            for y in by..by + block_h {
                for x in bx..bx + block_w {
                    let da = a[y * width + x] - mean_a;
                    let db = b[y * width + x] - mean_b;

                    var_a += da * da;
                    var_b += db * db;
                    covariance += da * db;
                }
            }
            var_a /= n;
            var_b /= n;
            covariance /= n;

            let numerator = (2.0 * mean_a * mean_b + C1) * (2.0 * covariance + C2);
            let denominator = (mean_a * mean_a + mean_b * mean_b + C1) * (var_a + var_b + C2);

            total += numerator / denominator;
            blocks += 1;
        }
    }
    Ok(total / blocks as f64)
}

fn gray_plane(buffer: &RasterBuffer) -> Vec<f64> {
    buffer
        .pixels()
        .iter()
        .map(|x| f64::from(luma_u8(x[0], x[1], x[2])))
        .collect()
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};
    use zune_raster::buffer::{RasterBuffer, Rgba};

    use crate::compare::ssim::ssim;

    fn noise(seed: u64) -> RasterBuffer {
        let mut rng = WyRand::new_seed(seed);
        RasterBuffer::from_fn(50, 40, |_, _| Rgba::gray(rng.generate())).unwrap()
    }

    #[test]
    fn test_identical_images() {
        let image = noise(1);
        let value = ssim(&image, &image, 11).unwrap();

        assert!((value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_different_images_score_lower() {
        let value = ssim(&noise(1), &noise(2), 11).unwrap();
        assert!(value < 0.5);
    }

    #[test]
    fn test_window_larger_than_image() {
        let image = noise(5);
        let value = ssim(&image, &image, 500).unwrap();

        assert!((value - 1.0).abs() < 1e-9);
        assert!(ssim(&image, &image, 0).is_err());
    }

    #[test]
    fn test_mismatched_sizes_are_resized() {
        let a = RasterBuffer::fill(Rgba::gray(128), 30, 30).unwrap();
        let b = RasterBuffer::fill(Rgba::gray(128), 10, 17).unwrap();

        assert!((ssim(&a, &b, 8).unwrap() - 1.0).abs() < 1e-9);
    }
}
