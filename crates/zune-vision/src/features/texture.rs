/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Local binary pattern texture descriptor
use zune_core::log::trace;
use zune_raster::buffer::RasterBuffer;
use zune_raster::errors::RasterErrors;
use zune_raster::grayscale::luma_u8;

/// Number of bins in an LBP histogram
pub const LBP_BINS: usize = 256;

/// Texture statistics of an image
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct TextureDescriptor {
    /// Normalized histogram of LBP codes, always 256 bins
    pub histogram:  Vec<f64>,
    /// Shannon entropy of the histogram in nats
    pub entropy:    f64,
    /// Sum of squared bin probabilities
    pub uniformity: f64
}

/// Compute the local binary pattern descriptor
///
/// For every pixel at least `radius` pixels away from the border, `neighbors`
/// points on a circle around it are sampled; bit `n` of the code is set when
/// neighbor `n` is at least as bright as the center.
///
/// # Arguments
/// - buffer: The image, only its luma is used
/// - radius: Circle radius in pixels, usually 1
/// - neighbors: Number of samples on the circle, `1..=8`, usually 8
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `radius` is zero or `neighbors` is outside `1..=8`
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn lbp_features(
    buffer: &RasterBuffer, radius: usize, neighbors: usize
) -> Result<TextureDescriptor, RasterErrors> {
    if radius == 0 {
        return Err(RasterErrors::InvalidParameter(
            "LBP radius must be greater than zero".to_string()
        ));
    }
    if !(1..=8).contains(&neighbors) {
        return Err(RasterErrors::InvalidParameter(format!(
            "LBP neighbors must be in 1..=8, found {neighbors}"
        )));
    }
    let (width, height) = buffer.dimensions();
    let gray: Vec<u8> = buffer
        .pixels()
        .iter()
        .map(|x| luma_u8(x[0], x[1], x[2]))
        .collect();

    let offsets: Vec<(isize, isize)> = (0..neighbors)
        .map(|n| {
            let theta = 2.0 * std::f64::consts::PI * n as f64 / neighbors as f64;
            let r = radius as f64;

            ((r * theta.cos()).round() as isize, (r * theta.sin()).round() as isize)
        })
        .collect();

    let mut counts = [0_usize; LBP_BINS];
    let mut total = 0_usize;

    for y in radius..height.saturating_sub(radius) {
        for x in radius..width.saturating_sub(radius) {
            let center = gray[y * width + x];
            let mut code = 0_usize;

            for (n, (dx, dy)) in offsets.iter().enumerate() {
                let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;

                if gray[sy * width + sx] >= center {
                    code |= 1 << n;
                }
            }
            counts[code] += 1;
            total += 1;
        }
    }
    if total == 0 {
        trace!("Image too small for LBP with radius {}", radius);

        return Ok(TextureDescriptor {
            histogram:  vec![0.0; LBP_BINS],
            entropy:    0.0,
            uniformity: 0.0
        });
    }
    let histogram: Vec<f64> = counts
        .iter()
        .map(|x| *x as f64 / total as f64)
        .collect();

    let entropy = -histogram
        .iter()
        .filter(|p| **p > 0.0)
        .map(|p| p * p.ln())
        .sum::<f64>();
    let uniformity = histogram.iter().map(|p| p * p).sum();

    Ok(TextureDescriptor {
        histogram,
        entropy,
        uniformity
    })
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};
    use zune_raster::buffer::{RasterBuffer, Rgba};

    use crate::features::texture::lbp_features;

    #[test]
    fn test_uniform_image() {
        let buffer = RasterBuffer::fill(Rgba::gray(90), 12, 12).unwrap();
        let texture = lbp_features(&buffer, 1, 8).unwrap();

        // every neighbor equals the center so every code is 0xff
        assert_eq!(texture.histogram[255], 1.0);
        assert_eq!(texture.entropy, 0.0);
        assert_eq!(texture.uniformity, 1.0);
    }

    #[test]
    fn test_noise_histogram_sums_to_one() {
        let mut rng = WyRand::new_seed(99);
        let buffer = RasterBuffer::from_fn(40, 30, |_, _| Rgba::gray(rng.generate())).unwrap();

        for (radius, neighbors) in [(1, 8), (2, 8), (1, 4), (3, 6)] {
            let texture = lbp_features(&buffer, radius, neighbors).unwrap();
            let sum: f64 = texture.histogram.iter().sum();

            assert_eq!(texture.histogram.len(), 256);
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(texture.entropy > 0.0);
            assert!(texture.uniformity > 0.0 && texture.uniformity < 1.0);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let buffer = RasterBuffer::new(8, 8).unwrap();

        assert!(lbp_features(&buffer, 0, 8).is_err());
        assert!(lbp_features(&buffer, 1, 0).is_err());
        assert!(lbp_features(&buffer, 1, 9).is_err());
    }

    #[test]
    fn test_tiny_image_has_no_interior() {
        let buffer = RasterBuffer::new(2, 2).unwrap();
        let texture = lbp_features(&buffer, 1, 8).unwrap();

        assert!(texture.histogram.iter().all(|x| *x == 0.0));
        assert_eq!(texture.entropy, 0.0);
    }
}
