/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Quantitative image comparison
//!
//! This module contains pixel metrics ([`mse`], [`psnr`], [`ssim`]),
//! histogram metrics ([`compare_histograms`]), perceptual hashes
//! and distances between feature vectors.
//!
//! [`compare_images`] runs the common ones and gathers them in a [`ComparisonReport`]
use zune_core::log::{debug, trace};
use zune_raster::buffer::RasterBuffer;
use zune_raster::errors::RasterErrors;
use zune_raster::resize::resize_bilinear;

pub use crate::compare::dct::dct_2d;
pub use crate::compare::hash::{
    average_hash, difference_hash, perceptual_hash, PerceptualHash, DEFAULT_HASH_SIZE
};
pub use crate::compare::histogram::{compare_histograms, HistogramMetric};
pub use crate::compare::mse::{mse, psnr, psnr_from_mse};
pub use crate::compare::ssim::ssim;
pub use crate::compare::vector::{cosine_similarity, euclidean_distance, manhattan_distance};
use crate::features::color_histogram;

pub mod dct;
pub mod hash;
pub mod histogram;
pub mod mse;
pub mod ssim;
pub mod vector;

/// Window used by [`compare_images`] for SSIM
pub const DEFAULT_SSIM_WINDOW: usize = 11;

/// Bins per channel of the histograms compared in [`compare_images`]
const REPORT_HISTOGRAM_BINS: usize = 32;

/// Summary of how similar two images are
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct ComparisonReport {
    pub mse:                   f64,
    /// Infinite for identical images
    pub psnr:                  f64,
    pub ssim:                  f64,
    pub average_hash:          f64,
    pub difference_hash:       f64,
    pub perceptual_hash:       f64,
    pub histogram_correlation: f64,
    pub histogram_chi_square:  f64
}

/// Compare two images with every metric
///
/// The second image is resized to the dimensions of the first for the
/// pixel metrics when they differ. Hash entries are similarities in `[0, 1]`.
///
/// # Errors
/// Propagates errors from the individual metrics
pub fn compare_images(
    img1: &RasterBuffer, img2: &RasterBuffer
) -> Result<ComparisonReport, RasterErrors> {
    let (width, height) = img1.dimensions();

    let resized;
    let same_size = if img2.dimensions() == (width, height) {
        img2
    } else {
        trace!("Resizing second image to {}x{}", width, height);
        resized = resize_bilinear(img2, width, height)?;
        &resized
    };
    let error = mse(img1, same_size)?;

    let hist1 = color_histogram(img1, REPORT_HISTOGRAM_BINS)?;
    let hist2 = color_histogram(img2, REPORT_HISTOGRAM_BINS)?;

    let report = ComparisonReport {
        mse:                   error,
        psnr:                  psnr_from_mse(error),
        ssim:                  ssim(img1, same_size, DEFAULT_SSIM_WINDOW)?,
        average_hash:          average_hash(img1, DEFAULT_HASH_SIZE)?
            .similarity(&average_hash(img2, DEFAULT_HASH_SIZE)?)?,
        difference_hash:       difference_hash(img1, DEFAULT_HASH_SIZE)?
            .similarity(&difference_hash(img2, DEFAULT_HASH_SIZE)?)?,
        perceptual_hash:       perceptual_hash(img1, DEFAULT_HASH_SIZE)?
            .similarity(&perceptual_hash(img2, DEFAULT_HASH_SIZE)?)?,
        histogram_correlation: compare_histograms(&hist1, &hist2, HistogramMetric::Correlation)?,
        histogram_chi_square:  compare_histograms(&hist1, &hist2, HistogramMetric::ChiSquare)?
    };
    debug!("Comparison report: {:?}", report);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};
    use zune_raster::buffer::{RasterBuffer, Rgba};

    use crate::compare::compare_images;

    #[test]
    fn test_identical_report() {
        let mut rng = WyRand::new_seed(42);
        let image =
            RasterBuffer::from_fn(48, 48, |_, _| Rgba::rgb(rng.generate(), rng.generate(), 9))
                .unwrap();

        let report = compare_images(&image, &image).unwrap();

        assert_eq!(report.mse, 0.0);
        assert!(report.psnr.is_infinite());
        assert!((report.ssim - 1.0).abs() < 1e-9);
        assert_eq!(report.average_hash, 1.0);
        assert_eq!(report.difference_hash, 1.0);
        assert_eq!(report.perceptual_hash, 1.0);
        assert!((report.histogram_correlation - 1.0).abs() < 1e-9);
        assert_eq!(report.histogram_chi_square, 0.0);
    }

    #[test]
    fn test_different_sizes() {
        let a = RasterBuffer::fill(Rgba::gray(90), 20, 20).unwrap();
        let b = RasterBuffer::fill(Rgba::gray(90), 31, 7).unwrap();

        let report = compare_images(&a, &b).unwrap();
        assert_eq!(report.mse, 0.0);
    }
}
