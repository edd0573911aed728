/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Numeric descriptors of an image
//!
//! Each descriptor can be computed on its own, or all of them at once via
//! [`extract_features`] which is driven by a single [`FeatureOptions`].
//!
//! # Example
//! ```
//! use zune_raster::buffer::{RasterBuffer, Rgba};
//! use zune_vision::features::{extract_features, feature_vector, FeatureOptions};
//!
//! let buffer = RasterBuffer::from_fn(64, 64, |x, y| Rgba::gray((x ^ y) as u8)).unwrap();
//! let features = extract_features(&buffer, &FeatureOptions::default()).unwrap();
//!
//! let vector = feature_vector(&features);
//! assert_eq!(vector.len(), 16 * 3 + 8 + 32 + 4);
//! ```
use zune_core::log::debug;
use zune_raster::buffer::RasterBuffer;
use zune_raster::errors::RasterErrors;

pub use crate::features::histogram::{
    color_histogram, edge_histogram, hsv_histogram, Histogram, HistogramChannel
};
pub use crate::features::keypoints::{keypoints, Keypoint, KeypointOptions};
pub use crate::features::shape::{shape_descriptors, ShapeDescriptor};
pub use crate::features::texture::{lbp_features, TextureDescriptor};
pub use crate::features::vector::feature_vector;

pub mod histogram;
pub mod keypoints;
pub mod shape;
pub mod texture;
pub mod vector;

/// All descriptors of a single image
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct FeatureSet {
    pub color_histogram: Histogram,
    pub hsv_histogram:   Histogram,
    pub edge_histogram:  Histogram,
    pub texture:         TextureDescriptor,
    pub shape:           ShapeDescriptor,
    pub keypoints:       Vec<Keypoint>
}

/// Parameters for [`extract_features`]
#[derive(Clone, Debug)]
pub struct FeatureOptions {
    color_bins:         usize,
    hsv_bins:           (usize, usize, usize),
    edge_bins:          usize,
    edge_min_magnitude: f32,
    lbp_radius:         usize,
    lbp_neighbors:      usize,
    keypoints:          Option<KeypointOptions>
}

impl Default for FeatureOptions {
    fn default() -> Self {
        FeatureOptions {
            color_bins:         16,
            hsv_bins:           (18, 8, 8),
            edge_bins:          8,
            edge_min_magnitude: 30.0,
            lbp_radius:         1,
            lbp_neighbors:      8,
            keypoints:          Some(KeypointOptions::default())
        }
    }
}

impl FeatureOptions {
    #[must_use]
    pub fn set_color_bins(mut self, bins: usize) -> Self {
        self.color_bins = bins;
        self
    }
    #[must_use]
    pub fn set_hsv_bins(mut self, h: usize, s: usize, v: usize) -> Self {
        self.hsv_bins = (h, s, v);
        self
    }
    #[must_use]
    pub fn set_edge_bins(mut self, bins: usize) -> Self {
        self.edge_bins = bins;
        self
    }
    /// Gradients at or below this magnitude are not counted in the edge histogram
    #[must_use]
    pub fn set_edge_min_magnitude(mut self, magnitude: f32) -> Self {
        self.edge_min_magnitude = magnitude;
        self
    }
    #[must_use]
    pub fn set_lbp(mut self, radius: usize, neighbors: usize) -> Self {
        self.lbp_radius = radius;
        self.lbp_neighbors = neighbors;
        self
    }
    /// Configure keypoint detection, `None` skips it
    ///
    /// Keypoints are the most expensive descriptor by far
    #[must_use]
    pub fn set_keypoints(mut self, options: Option<KeypointOptions>) -> Self {
        self.keypoints = options;
        self
    }
}

/// Compute every descriptor of `buffer`
///
/// # Errors
/// Any error from the individual descriptors, mostly invalid parameters
pub fn extract_features(
    buffer: &RasterBuffer, options: &FeatureOptions
) -> Result<FeatureSet, RasterErrors> {
    let (h, s, v) = options.hsv_bins;

    let keypoints = match &options.keypoints {
        Some(keypoint_options) => keypoints(buffer, keypoint_options)?,
        None => Vec::new()
    };
    let features = FeatureSet {
        color_histogram: color_histogram(buffer, options.color_bins)?,
        hsv_histogram: hsv_histogram(buffer, h, s, v)?,
        edge_histogram: edge_histogram(buffer, options.edge_bins, options.edge_min_magnitude)?,
        texture: lbp_features(buffer, options.lbp_radius, options.lbp_neighbors)?,
        shape: shape_descriptors(buffer),
        keypoints
    };
    debug!(
        "Extracted features with {} keypoints",
        features.keypoints.len()
    );
    Ok(features)
}
