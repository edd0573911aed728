/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Color, HSV and edge orientation histograms
//!
//! All histograms are normalized, the bins of every channel sum to one
//! unless the channel received no samples, in which case all bins are zero.
use zune_core::log::trace;
use zune_raster::buffer::RasterBuffer;
use zune_raster::colorspace::rgb_to_hsv;
use zune_raster::errors::RasterErrors;
use zune_raster::sobel::sobel_edge_detection;

/// A single named channel of a histogram
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct HistogramChannel {
    pub name: String,
    pub bins: Vec<f64>
}

/// An ordered list of histogram channels
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct Histogram {
    pub channels: Vec<HistogramChannel>
}

impl Histogram {
    /// Find a channel by name
    #[must_use]
    pub fn channel(&self, name: &str) -> Option<&HistogramChannel> {
        self.channels.iter().find(|x| x.name == name)
    }

    /// Return true if both histograms have the same channel count and bins per channel
    #[must_use]
    pub fn same_shape(&self, other: &Histogram) -> bool {
        self.channels.len() == other.channels.len()
            && self
                .channels
                .iter()
                .zip(&other.channels)
                .all(|(a, b)| a.bins.len() == b.bins.len())
    }

    fn from_counts(names: &[&str], counts: Vec<Vec<usize>>, total: usize) -> Histogram {
        let channels = names
            .iter()
            .zip(counts)
            .map(|(name, counts)| HistogramChannel {
                name: (*name).to_string(),
                bins: normalize(&counts, total)
            })
            .collect();

        Histogram { channels }
    }
}

fn normalize(counts: &[usize], total: usize) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts.iter().map(|x| *x as f64 / total as f64).collect()
}

/// Map `value` in `[0,range)` to one of `bins` equal buckets
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bin_index(value: f64, range: f64, bins: usize) -> usize {
    let width = range / bins as f64;
    ((value / width).floor().max(0.0) as usize).min(bins - 1)
}

fn check_bins(bins: usize, what: &str) -> Result<(), RasterErrors> {
    if !(1..=256).contains(&bins) {
        return Err(RasterErrors::InvalidParameter(format!(
            "{what} bins must be in 1..=256, found {bins}"
        )));
    }
    Ok(())
}

/// Histogram of the red, green and blue channels
///
/// # Arguments
/// - buffer: The image
/// - bins: Number of bins per channel, 16 is a good default
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `bins` is not in `1..=256`
pub fn color_histogram(buffer: &RasterBuffer, bins: usize) -> Result<Histogram, RasterErrors> {
    check_bins(bins, "Color histogram")?;

    let mut counts = vec![vec![0_usize; bins]; 3];

    for pix in buffer.pixels() {
        for (channel, value) in counts.iter_mut().zip(pix.iter()) {
            channel[bin_index(f64::from(*value), 256.0, bins)] += 1;
        }
    }
    Ok(Histogram::from_counts(
        &["r", "g", "b"],
        counts,
        buffer.pixels().len()
    ))
}

/// Histogram of hue, saturation and value
///
/// Hue covers `[0,360)`, saturation and value cover `[0,100]`.
/// The customary bin counts are 18, 8 and 8.
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if a bin count is not in `1..=256`
pub fn hsv_histogram(
    buffer: &RasterBuffer, h_bins: usize, s_bins: usize, v_bins: usize
) -> Result<Histogram, RasterErrors> {
    check_bins(h_bins, "Hue")?;
    check_bins(s_bins, "Saturation")?;
    check_bins(v_bins, "Value")?;

    let mut counts = vec![vec![0; h_bins], vec![0; s_bins], vec![0; v_bins]];

    for pix in buffer.pixels() {
        let (h, s, v) = rgb_to_hsv(pix[0], pix[1], pix[2]);

        counts[0][bin_index(f64::from(h), 360.0, h_bins)] += 1;
        counts[1][bin_index(f64::from(s), 100.0, s_bins)] += 1;
        counts[2][bin_index(f64::from(v), 100.0, v_bins)] += 1;
    }
    Ok(Histogram::from_counts(
        &["h", "s", "v"],
        counts,
        buffer.pixels().len()
    ))
}

/// Histogram of gradient directions of strong edges
///
/// Only interior pixels whose sobel magnitude is strictly greater than
/// `min_magnitude` are counted, directions are mapped to `[0,360)` degrees.
/// Returns all zeros when no pixel qualifies.
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `bins` is not in `1..=256`
pub fn edge_histogram(
    buffer: &RasterBuffer, bins: usize, min_magnitude: f32
) -> Result<Histogram, RasterErrors> {
    check_bins(bins, "Edge histogram")?;

    let gradients = sobel_edge_detection(buffer);
    let (width, height) = buffer.dimensions();

    let mut counts = vec![0_usize; bins];
    let mut total = 0;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = y * width + x;

            if gradients.magnitude[idx] <= min_magnitude {
                continue;
            }
            let degrees = f64::from(gradients.direction[idx]).to_degrees().rem_euclid(360.0);

            counts[bin_index(degrees, 360.0, bins)] += 1;
            total += 1;
        }
    }
    trace!("{} pixels contributed to the edge histogram", total);

    Ok(Histogram::from_counts(&["edge"], vec![counts], total))
}
