/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scale invariant keypoints from difference of gaussian extrema
//!
//! For every octave `o` a stack of `scales + 3` gaussian images is built from the
//! full resolution luma plane with `σ = σ0 · 2^o · 2^(i/scales)`. Adjacent images are
//! subtracted giving `scales + 2` difference of gaussian (DoG) layers, and
//! extrema are searched on the `scales` inner layers so every candidate has a
//! layer above and below it.
//!
//! A pixel is a keypoint when its absolute DoG response exceeds the threshold
//! and it is strictly greater or strictly smaller than all 26 neighbors
//! in its own layer and the two adjacent layers.
use zune_core::log::{debug, trace};
use zune_raster::buffer::RasterBuffer;
use zune_raster::cancel::CancelToken;
use zune_raster::errors::RasterErrors;
use zune_raster::gaussian_blur::gaussian_blur_plane;

/// A detected keypoint
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct Keypoint {
    pub x:           f32,
    pub y:           f32,
    /// Sigma of the gaussian level the keypoint was found on
    pub scale:       f32,
    pub octave:      usize,
    /// DoG value at the keypoint, its sign tells maxima from minima
    pub response:    f32,
    /// Dominant gradient direction in degrees, a multiple of 10
    pub orientation: f32
}

/// Options for keypoint detection
#[derive(Clone, Debug)]
pub struct KeypointOptions {
    threshold:     f32,
    octaves:       usize,
    scales:        usize,
    sigma:         f32,
    max_keypoints: usize,
    cancel:        CancelToken
}

impl Default for KeypointOptions {
    fn default() -> Self {
        KeypointOptions {
            threshold:     10.0,
            octaves:       3,
            scales:        3,
            sigma:         1.6,
            max_keypoints: 100,
            cancel:        CancelToken::default()
        }
    }
}

impl KeypointOptions {
    /// Minimum absolute DoG response of a keypoint
    #[must_use]
    pub fn set_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
    #[must_use]
    pub fn set_octaves(mut self, octaves: usize) -> Self {
        self.octaves = octaves;
        self
    }
    /// Number of scales searched per octave
    #[must_use]
    pub fn set_scales(mut self, scales: usize) -> Self {
        self.scales = scales;
        self
    }
    /// Sigma of the first gaussian level
    #[must_use]
    pub fn set_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }
    /// Keep at most this many keypoints, strongest first
    #[must_use]
    pub fn set_max_keypoints(mut self, max_keypoints: usize) -> Self {
        self.max_keypoints = max_keypoints;
        self
    }
    #[must_use]
    pub fn set_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }
}

/// Gaussian and DoG planes of every octave stored in flat arenas
///
/// Gaussian level `l` of octave `o` lives at `o * gaussian_levels + l`,
/// DoG layers use `o * dog_levels + l`.
struct ScaleSpace {
    width:           usize,
    height:          usize,
    gaussian_levels: usize,
    dog_levels:      usize,
    sigmas:          Vec<f32>,
    gaussians:       Vec<Vec<f32>>,
    dogs:            Vec<Vec<f32>>
}

impl ScaleSpace {
    fn build(
        plane: &[f32], width: usize, height: usize, options: &KeypointOptions
    ) -> Result<ScaleSpace, RasterErrors> {
        let gaussian_levels = options.scales + 3;
        let dog_levels = gaussian_levels - 1;

        let mut sigmas = Vec::with_capacity(options.octaves * gaussian_levels);
        let mut gaussians = Vec::with_capacity(options.octaves * gaussian_levels);
        let mut dogs = Vec::with_capacity(options.octaves * dog_levels);

        for octave in 0..options.octaves {
            for level in 0..gaussian_levels {
                options.cancel.check("Keypoint detection")?;

                let sigma = options.sigma
                    * 2.0_f32.powi(octave as i32)
                    * 2.0_f32.powf(level as f32 / options.scales as f32);

                trace!("Octave {} level {} sigma {}", octave, level, sigma);

                gaussians.push(gaussian_blur_plane(plane, width, height, sigma)?);
                sigmas.push(sigma);
            }
            let base = octave * gaussian_levels;

            for level in 0..dog_levels {
                let lower = &gaussians[base + level];
                let upper = &gaussians[base + level + 1];

                dogs.push(upper.iter().zip(lower).map(|(a, b)| a - b).collect());
            }
        }
        Ok(ScaleSpace {
            width,
            height,
            gaussian_levels,
            dog_levels,
            sigmas,
            gaussians,
            dogs
        })
    }

    fn dog(&self, octave: usize, level: usize) -> &[f32] {
        &self.dogs[octave * self.dog_levels + level]
    }

    fn gaussian(&self, octave: usize, level: usize) -> &[f32] {
        &self.gaussians[octave * self.gaussian_levels + level]
    }

    /// Return true if the DoG value at `(x,y)` is a strict extremum of its 3x3x3 neighborhood
    fn is_extremum(&self, octave: usize, level: usize, x: usize, y: usize) -> bool {
        let value = self.dog(octave, level)[y * self.width + x];

        let mut is_max = true;
        let mut is_min = true;

        for l in level - 1..=level + 1 {
            let layer = self.dog(octave, l);

            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    if l == level && nx == x && ny == y {
                        continue;
                    }
                    let other = layer[ny * self.width + nx];

                    is_max &= value > other;
                    is_min &= value < other;

                    if !is_max && !is_min {
                        return false;
                    }
                }
            }
        }
        is_max || is_min
    }

    /// Dominant orientation around `(x,y)` on the gaussian matching a DoG layer
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn orientation(&self, octave: usize, level: usize, x: usize, y: usize) -> f32 {
        const RADIUS: isize = 8;
        const BINS: usize = 36;

        let plane = self.gaussian(octave, level);
        let mut histogram = [0.0_f32; BINS];

        for dy in -RADIUS..=RADIUS {
            for dx in -RADIUS..=RADIUS {
                if dx * dx + dy * dy > RADIUS * RADIUS {
                    continue;
                }
                let px = x as isize + dx;
                let py = y as isize + dy;

                if px < 1 || py < 1 || px >= self.width as isize - 1 || py >= self.height as isize - 1
                {
                    continue;
                }
                let (px, py) = (px as usize, py as usize);
                let w = self.width;

                let gx = plane[py * w + px + 1] - plane[py * w + px - 1];
                let gy = plane[(py + 1) * w + px] - plane[(py - 1) * w + px];

                let magnitude = (gx * gx + gy * gy).sqrt();
                let angle = gy.atan2(gx).to_degrees().rem_euclid(360.0);

                histogram[(angle / 10.0) as usize % BINS] += magnitude;
            }
        }
        let mut best = 0;

        for (i, value) in histogram.iter().enumerate() {
            if *value > histogram[best] {
                best = i;
            }
        }
        best as f32 * 10.0
    }
}

/// Detect keypoints in `buffer`
///
/// Keypoints are sorted by absolute response, strongest first, and truncated
/// to the configured maximum.
///
/// # Errors
/// - [`RasterErrors::InvalidParameter`] for zero octaves, zero scales or a non positive sigma
/// - [`RasterErrors::Cancelled`] if the cancel token fires between pyramid levels
#[allow(clippy::cast_precision_loss)]
pub fn keypoints(
    buffer: &RasterBuffer, options: &KeypointOptions
) -> Result<Vec<Keypoint>, RasterErrors> {
    if options.octaves == 0 || options.scales == 0 {
        return Err(RasterErrors::InvalidParameter(
            "Keypoint detection needs at least one octave and one scale".to_string()
        ));
    }
    let (width, height) = buffer.dimensions();
    let space = ScaleSpace::build(&buffer.luma_plane(), width, height, options)?;

    let mut found = Vec::new();

    for octave in 0..options.octaves {
        // layers 0 and dog_levels-1 only serve as neighbors
        for level in 1..space.dog_levels - 1 {
            options.cancel.check("Keypoint detection")?;

            let dog = space.dog(octave, level);

            for y in 1..height.saturating_sub(1) {
                for x in 1..width.saturating_sub(1) {
                    let response = dog[y * width + x];

                    if response.abs() <= options.threshold
                        || !space.is_extremum(octave, level, x, y)
                    {
                        continue;
                    }
                    found.push(Keypoint {
                        x: x as f32,
                        y: y as f32,
                        scale: space.sigmas[octave * space.gaussian_levels + level],
                        octave,
                        response,
                        orientation: space.orientation(octave, level, x, y)
                    });
                }
            }
        }
    }
    debug!("Found {} keypoint candidates", found.len());

    found.sort_by(|a, b| b.response.abs().total_cmp(&a.response.abs()));
    found.truncate(options.max_keypoints);

    Ok(found)
}

#[cfg(test)]
mod tests {
    use zune_raster::buffer::{RasterBuffer, Rgba};
    use zune_raster::cancel::CancelToken;
    use zune_raster::errors::RasterErrors;

    use crate::features::keypoints::{keypoints, KeypointOptions};

    fn disc() -> RasterBuffer {
        RasterBuffer::from_fn(64, 64, |x, y| {
            let dx = x as isize - 32;
            let dy = y as isize - 32;

            if dx * dx + dy * dy <= 16 {
                Rgba::WHITE
            } else {
                Rgba::BLACK
            }
        })
        .unwrap()
    }

    #[test]
    fn test_flat_image_has_no_keypoints() {
        let buffer = RasterBuffer::fill(Rgba::gray(100), 32, 32).unwrap();
        let points = keypoints(&buffer, &KeypointOptions::default()).unwrap();

        assert!(points.is_empty());
    }

    #[test]
    fn test_disc_center_is_detected() {
        let options = KeypointOptions::default().set_max_keypoints(usize::MAX);
        let points = keypoints(&disc(), &options).unwrap();

        assert!(points
            .iter()
            .any(|p| (p.x - 32.0).abs() <= 1.0 && (p.y - 32.0).abs() <= 1.0));
    }

    #[test]
    fn test_sorted_and_truncated() {
        let options = KeypointOptions::default().set_max_keypoints(3);
        let points = keypoints(&disc(), &options).unwrap();

        assert!(!points.is_empty() && points.len() <= 3);

        for pair in points.windows(2) {
            assert!(pair[0].response.abs() >= pair[1].response.abs());
        }
        for p in &points {
            assert!(p.response.abs() > 10.0);
            assert_eq!(p.orientation % 10.0, 0.0);
        }
    }

    #[test]
    fn test_cancelled() {
        let token = CancelToken::new();
        token.cancel();

        let options = KeypointOptions::default().set_cancel_token(token);
        let result = keypoints(&disc(), &options);

        assert!(matches!(result, Err(RasterErrors::Cancelled(_))));
    }
}
