/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Distances between histograms
//!
//! Every metric is computed per channel and the per channel results are averaged.
use zune_core::log::trace;
use zune_raster::errors::RasterErrors;

use crate::features::Histogram;

/// Floor for the Bhattacharyya coefficient before taking its logarithm
const BHATTACHARYYA_EPSILON: f64 = 1e-10;

/// Histogram comparison metrics
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HistogramMetric {
    /// Pearson correlation, 1.0 for identical histograms
    Correlation,
    /// Chi-square distance, 0.0 for identical histograms
    ChiSquare,
    /// Sum of bin minimums, 1.0 for identical normalized histograms
    Intersection,
    /// Bhattacharyya distance, 0.0 for identical normalized histograms
    Bhattacharyya
}

impl HistogramMetric {
    /// Parse a metric from its name
    #[must_use]
    pub fn from_name(name: &str) -> Option<HistogramMetric> {
        match name.to_ascii_lowercase().as_str() {
            "correlation" => Some(HistogramMetric::Correlation),
            "chi-square" | "chisquare" | "chi_square" => Some(HistogramMetric::ChiSquare),
            "intersection" => Some(HistogramMetric::Intersection),
            "bhattacharyya" => Some(HistogramMetric::Bhattacharyya),
            _ => None
        }
    }
}

/// Compare two histograms with `metric`
///
/// # Errors
/// [`RasterErrors::DimensionMismatch`] if the histograms have a different number of
/// channels or bins
pub fn compare_histograms(
    a: &Histogram, b: &Histogram, metric: HistogramMetric
) -> Result<f64, RasterErrors> {
    if !a.same_shape(b) {
        return Err(RasterErrors::DimensionMismatch(
            "Histograms must have the same channels and bins".to_string()
        ));
    }
    let pairs = a
        .channels
        .iter()
        .zip(&b.channels)
        .map(|(x, y)| (x.bins.as_slice(), y.bins.as_slice()));

    let result = match metric {
        HistogramMetric::Correlation => {
            let correlations: Vec<f64> = pairs.filter_map(|(x, y)| correlation(x, y)).collect();

            if correlations.is_empty() {
                trace!("Every channel has zero variance, correlation is 0");
                0.0
            } else {
                mean(&correlations)
            }
        }
        HistogramMetric::ChiSquare => mean(&pairs.map(|(x, y)| chi_square(x, y)).collect::<Vec<_>>()),
        HistogramMetric::Intersection => {
            mean(&pairs.map(|(x, y)| intersection(x, y)).collect::<Vec<_>>())
        }
        HistogramMetric::Bhattacharyya => {
            mean(&pairs.map(|(x, y)| bhattacharyya(x, y)).collect::<Vec<_>>())
        }
    };
    Ok(result)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation, `None` when either side has zero variance
fn correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;

    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;

        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    let denominator = (var_a * var_b).sqrt();

    if denominator == 0.0 {
        return None;
    }
    Some(covariance / denominator)
}

fn chi_square(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .filter(|(x, y)| *x + *y > 0.0)
        .map(|(x, y)| (x - y).powi(2) / (x + y))
        .sum()
}

fn intersection(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x.min(*y)).sum()
}

fn bhattacharyya(a: &[f64], b: &[f64]) -> f64 {
    let coefficient: f64 = a.iter().zip(b).map(|(x, y)| (x * y).sqrt()).sum();

    -coefficient.max(BHATTACHARYYA_EPSILON).ln()
}
