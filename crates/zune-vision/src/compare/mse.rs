/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Mean squared error and peak signal to noise ratio
use zune_raster::buffer::RasterBuffer;
use zune_raster::errors::RasterErrors;

/// Mean squared error over the red, green and blue channels
///
/// # Errors
/// [`RasterErrors::DimensionMismatch`] if the images differ in size
pub fn mse(img1: &RasterBuffer, img2: &RasterBuffer) -> Result<f64, RasterErrors> {
    if img1.dimensions() != img2.dimensions() {
        let (w1, h1) = img1.dimensions();
        let (w2, h2) = img2.dimensions();

        return Err(RasterErrors::DimensionMismatch(format!(
            "Cannot compute MSE of a {w1}x{h1} and a {w2}x{h2} image"
        )));
    }
    let sum: u64 = img1
        .pixels()
        .iter()
        .zip(img2.pixels())
        .map(|(a, b)| {
            a[..3]
                .iter()
                .zip(&b[..3])
                .map(|(x, y)| {
                    let d = u64::from(x.abs_diff(*y));
                    d * d
                })
                .sum::<u64>()
        })
        .sum();

    Ok(sum as f64 / (img1.pixels().len() * 3) as f64)
}

/// Peak signal to noise ratio in decibels
///
/// Identical images give positive infinity
///
/// # Errors
/// [`RasterErrors::DimensionMismatch`] if the images differ in size
pub fn psnr(img1: &RasterBuffer, img2: &RasterBuffer) -> Result<f64, RasterErrors> {
    Ok(psnr_from_mse(mse(img1, img2)?))
}

/// Convert a mean squared error to PSNR
#[must_use]
pub fn psnr_from_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (255.0 * 255.0 / mse).log10()
}

#[cfg(test)]
mod tests {
    use zune_raster::buffer::{RasterBuffer, Rgba};
    use zune_raster::errors::RasterErrors;

    use crate::compare::mse::{mse, psnr};

    #[test]
    fn test_identical() {
        let image = RasterBuffer::from_fn(9, 9, |x, y| Rgba::rgb(x as u8, y as u8, 3)).unwrap();

        assert_eq!(mse(&image, &image).unwrap(), 0.0);
        assert_eq!(psnr(&image, &image).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_known_error() {
        let a = RasterBuffer::fill(Rgba::rgb(10, 10, 10), 4, 4).unwrap();
        // only red differs by 30, alpha is ignored
        let b = RasterBuffer::fill(Rgba::new(40, 10, 10, 0), 4, 4).unwrap();

        assert_eq!(mse(&a, &b).unwrap(), 300.0);
        let expected = 10.0 * (65025.0_f64 / 300.0).log10();
        assert!((psnr(&a, &b).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = RasterBuffer::new(4, 4).unwrap();
        let b = RasterBuffer::new(4, 5).unwrap();

        assert!(matches!(
            mse(&a, &b),
            Err(RasterErrors::DimensionMismatch(_))
        ));
    }
}
