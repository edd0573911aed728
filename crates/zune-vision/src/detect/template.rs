/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Template matching with normalized cross correlation
use zune_core::log::{debug, trace};
use zune_raster::buffer::RasterBuffer;
use zune_raster::errors::RasterErrors;
use zune_raster::grayscale::luma_u8;

use crate::detect::nms::{non_maximum_suppression, BoundingBox, Match};

/// Parameters for [`template_match`]
#[derive(Copy, Clone, Debug)]
pub struct TemplateMatchOptions {
    threshold:     f64,
    iou_threshold: f64
}

impl Default for TemplateMatchOptions {
    fn default() -> Self {
        TemplateMatchOptions {
            threshold:     0.8,
            iou_threshold: 0.5
        }
    }
}

impl TemplateMatchOptions {
    /// A position is reported only when its correlation exceeds this value
    #[must_use]
    pub fn set_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
    /// Overlap above which the weaker of two matches is discarded
    #[must_use]
    pub fn set_iou_threshold(mut self, iou_threshold: f64) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
    #[must_use]
    pub const fn iou_threshold(&self) -> f64 {
        self.iou_threshold
    }
}

/// Find every occurrence of `template` in `source`
///
/// Every placement of the template is scored by the normalized cross correlation
/// of the luma values, clamped to `[0, 1]`. Placements scoring above the
/// threshold are reduced by non maximum suppression and returned best first.
///
/// # Errors
/// [`RasterErrors::DimensionMismatch`] if the template is wider or taller than the source
pub fn template_match(
    source: &RasterBuffer, template: &RasterBuffer, options: &TemplateMatchOptions
) -> Result<Vec<Match>, RasterErrors> {
    let (sw, sh) = source.dimensions();
    let (tw, th) = template.dimensions();

    if tw > sw || th > sh {
        return Err(RasterErrors::DimensionMismatch(format!(
            "Template {tw}x{th} is larger than source {sw}x{sh}"
        )));
    }
    let src = luma_plane(source);
    let tpl = TemplateStats::new(&luma_plane(template), tw, th);

    let out_w = sw - tw + 1;
    let out_h = sh - th + 1;
    let scores = score_map(&src, sw, &tpl, out_w, out_h)?;

    let candidates: Vec<Match> = scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score > options.threshold)
        .map(|(i, score)| Match {
            bounding_box: BoundingBox::new(i % out_w, i / out_w, tw, th),
            confidence:   *score
        })
        .collect();

    trace!("{} placements above threshold", candidates.len());

    let matches = non_maximum_suppression(candidates, options.iou_threshold);

    debug!("Template matching found {} matches", matches.len());

    Ok(matches)
}

fn luma_plane(buffer: &RasterBuffer) -> Vec<f64> {
    buffer
        .pixels()
        .iter()
        .map(|x| f64::from(luma_u8(x[0], x[1], x[2])))
        .collect()
}

struct TemplateStats {
    values: Vec<f64>,
    width:  usize,
    height: usize,
    mean:   f64,
    /// `Σy² - n·ȳ²`
    spread: f64
}

impl TemplateStats {
    fn new(values: &[f64], width: usize, height: usize) -> TemplateStats {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let sum_sq: f64 = values.iter().map(|x| x * x).sum();

        TemplateStats {
            values: values.to_vec(),
            width,
            height,
            mean,
            spread: sum_sq - n * mean * mean
        }
    }

    /// Correlation of the template placed at `(x, y)` in `src`
    fn score(&self, src: &[f64], stride: usize, x: usize, y: usize) -> f64 {
        let n = self.values.len() as f64;

        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut sum_xy = 0.0;

        for (ty, row) in self.values.chunks_exact(self.width).enumerate() {
            let start = (y + ty) * stride + x;
            let window = &src[start..start + self.width];

            for (s, t) in window.iter().zip(row) {
                sum += s;
                sum_sq += s * s;
                sum_xy += s * t;
            }
        }
        let mean = sum / n;
        let numerator = sum_xy - n * mean * self.mean;
        let denominator = ((sum_sq - n * mean * mean) * self.spread).sqrt();

        if denominator == 0.0 || !denominator.is_finite() {
            return 0.0;
        }
        (numerator / denominator).clamp(0.0, 1.0)
    }
}

/// Score every placement, row major
fn score_map(
    src: &[f64], stride: usize, tpl: &TemplateStats, out_w: usize, out_h: usize
) -> Result<Vec<f64>, RasterErrors> {
    let mut scores = vec![0.0; out_w * out_h];

    trace!(
        "Scoring {}x{} placements of a {}x{} template",
        out_w,
        out_h,
        tpl.width,
        tpl.height
    );

    #[cfg(feature = "threads")]
    {
        let threads = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1);
        let rows_per_band = out_h.div_ceil(threads).max(1);

        std::thread::scope(|s| {
            let mut results = vec![];

            for (band, out_band) in scores.chunks_mut(rows_per_band * out_w).enumerate() {
                let handle = s.spawn(move || {
                    let start_row = band * rows_per_band;

                    for (i, out_row) in out_band.chunks_exact_mut(out_w).enumerate() {
                        for (x, score) in out_row.iter_mut().enumerate() {
                            *score = tpl.score(src, stride, x, start_row + i);
                        }
                    }
                });
                results.push(handle);
            }
            results
                .into_iter()
                .map(|x| {
                    x.join()
                        .map_err(|_| RasterErrors::GenericStr("Template matching thread panicked"))
                })
                .collect::<Result<Vec<()>, RasterErrors>>()
        })?;
    }
    #[cfg(not(feature = "threads"))]
    {
        for (y, out_row) in scores.chunks_exact_mut(out_w).enumerate() {
            for (x, score) in out_row.iter_mut().enumerate() {
                *score = tpl.score(src, stride, x, y);
            }
        }
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};
    use zune_raster::buffer::{RasterBuffer, Rgba};
    use zune_raster::crop::crop;
    use zune_raster::errors::RasterErrors;

    use crate::detect::template::{template_match, TemplateMatchOptions};

    fn noise(width: usize, height: usize, seed: u64) -> RasterBuffer {
        let mut rng = WyRand::new_seed(seed);
        RasterBuffer::from_fn(width, height, |_, _| Rgba::gray(rng.generate())).unwrap()
    }

    #[test]
    fn test_exact_crop_is_found_once() {
        let source = noise(64, 48, 7);
        let template = crop(&source, 20, 12, 16, 16).unwrap();

        let matches = template_match(&source, &template, &TemplateMatchOptions::default()).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].bounding_box.x, 20);
        assert_eq!(matches[0].bounding_box.y, 12);
        assert_eq!(matches[0].bounding_box.width, 16);
        assert!(matches[0].confidence > 0.99);
    }

    #[test]
    fn test_score_equal_to_threshold_is_rejected() {
        let source = noise(40, 30, 11);
        let template = crop(&source, 8, 5, 12, 12).unwrap();

        // scores are clamped to 1.0, so nothing can exceed it
        let options = TemplateMatchOptions::default().set_threshold(1.0);
        let matches = template_match(&source, &template, &options).unwrap();

        assert!(matches.is_empty());
    }

    #[test]
    fn test_flat_template_scores_zero() {
        let source = noise(20, 20, 3);
        let template = RasterBuffer::fill(Rgba::gray(40), 4, 4).unwrap();
        let options = TemplateMatchOptions::default().set_threshold(-1.0);

        let matches = template_match(&source, &template, &options).unwrap();

        assert!(!matches.is_empty());
        assert!(matches.iter().all(|m| m.confidence == 0.0));
    }

    #[test]
    fn test_template_too_large() {
        let source = noise(10, 10, 1);
        let template = noise(11, 5, 1);

        assert!(matches!(
            template_match(&source, &template, &TemplateMatchOptions::default()),
            Err(RasterErrors::DimensionMismatch(_))
        ));
    }
}

#[cfg(feature = "benchmarks")]
#[cfg(test)]
mod benchmarks {
    extern crate test;

    use zune_raster::buffer::{RasterBuffer, Rgba};
    use zune_raster::crop::crop;

    use crate::detect::template::{template_match, TemplateMatchOptions};

    #[bench]
    fn template_match_bench(b: &mut test::Bencher) {
        let source =
            RasterBuffer::from_fn(320, 240, |x, y| Rgba::gray(((x * 7) ^ (y * 3)) as u8)).unwrap();
        let template = crop(&source, 100, 80, 24, 24).unwrap();
        let options = TemplateMatchOptions::default();

        b.iter(|| template_match(&source, &template, &options).unwrap());
    }
}
