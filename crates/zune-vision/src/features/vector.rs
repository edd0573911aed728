/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Flatten a feature set into a single vector
use crate::features::FeatureSet;

/// Number of LBP bins copied into a feature vector
pub const TOP_LBP_BINS: usize = 32;

/// Concatenate features into one vector for distance based comparison
///
/// The layout is fixed
/// 1. the r, g and b channels of the color histogram
/// 2. the edge orientation histogram
/// 3. the 32 largest LBP bins in descending order
/// 4. the four Hu moments
#[must_use]
pub fn feature_vector(features: &FeatureSet) -> Vec<f64> {
    let mut vector = Vec::new();

    for name in ["r", "g", "b"] {
        if let Some(channel) = features.color_histogram.channel(name) {
            vector.extend_from_slice(&channel.bins);
        }
    }
    for channel in &features.edge_histogram.channels {
        vector.extend_from_slice(&channel.bins);
    }

    let mut lbp = features.texture.histogram.clone();
    lbp.sort_by(|a, b| b.total_cmp(a));
    vector.extend(lbp.iter().take(TOP_LBP_BINS));

    vector.extend_from_slice(&features.shape.hu);

    vector
}
