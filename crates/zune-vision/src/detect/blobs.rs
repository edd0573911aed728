/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Connected component analysis of binary masks
//!
//! Labeling is the classic two pass scheme, the first pass assigns provisional
//! labels looking only at the top and left neighbours and records equivalences
//! in a [`UnionFind`], the second pass replaces every label by its representative.
use core::f64::consts::PI;

use zune_core::log::{debug, trace};
use zune_raster::buffer::RasterBuffer;
use zune_raster::grayscale::luma_u8;

use crate::detect::nms::BoundingBox;
use crate::detect::union_find::UnionFind;

/// Smallest blob kept when no area is given
pub const DEFAULT_MIN_AREA: usize = 100;

/// Mask values at or above this luma are foreground
const FOREGROUND_LUMA: u8 = 128;

/// A 4-connected region of foreground pixels
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct Blob {
    /// 1-based, in raster order of each blob's first pixel
    pub label:        usize,
    pub area:         usize,
    pub centroid:     (f64, f64),
    pub bounding_box: BoundingBox,
    /// Count of pixel sides that do not touch another foreground pixel
    pub perimeter:    usize,
    /// `4π·area/perimeter²`, 1.0 for a perfect disc
    pub circularity:  f64
}

/// Per pixel component ids, 0 is background
///
/// Ids are dense and numbered in raster order of first appearance
pub(crate) struct LabelMap {
    pub(crate) width:      usize,
    pub(crate) height:     usize,
    pub(crate) labels:     Vec<usize>,
    pub(crate) components: usize
}

impl LabelMap {
    pub(crate) fn label_at(&self, x: usize, y: usize) -> usize {
        self.labels[y * self.width + x]
    }
}

pub(crate) fn foreground(mask: &RasterBuffer) -> Vec<bool> {
    mask.pixels()
        .iter()
        .map(|x| luma_u8(x[0], x[1], x[2]) >= FOREGROUND_LUMA)
        .collect()
}

pub(crate) fn label_components(mask: &RasterBuffer) -> LabelMap {
    let (width, height) = mask.dimensions();
    let fg = foreground(mask);

    let mut labels = vec![0_usize; width * height];
    let mut sets = UnionFind::new();

    // first pass
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;

            if !fg[i] {
                continue;
            }
            let top = if y > 0 { labels[i - width] } else { 0 };
            let left = if x > 0 { labels[i - 1] } else { 0 };

            labels[i] = match (top, left) {
                (0, 0) => sets.make_set(),
                (t, 0) => t,
                (0, l) => l,
                (t, l) => sets.union(t, l)
            };
        }
    }
    trace!("First pass created {} provisional labels", sets.len() - 1);

    // second pass, resolve and renumber densely
    let mut dense = vec![0_usize; sets.len()];
    let mut components = 0;

    for label in labels.iter_mut().filter(|x| **x != 0) {
        let root = sets.find(*label);

        if dense[root] == 0 {
            components += 1;
            dense[root] = components;
        }
        *label = dense[root];
    }

    LabelMap {
        width,
        height,
        labels,
        components
    }
}

struct Accumulator {
    area:      usize,
    sum_x:     f64,
    sum_y:     f64,
    min_x:     usize,
    min_y:     usize,
    max_x:     usize,
    max_y:     usize,
    perimeter: usize
}

/// Find the connected foreground regions of `mask`
///
/// Foreground is every pixel with a luma of at least 128. Regions smaller
/// than `min_area` pixels are dropped, the rest are numbered from 1.
#[must_use]
pub fn detect_blobs(mask: &RasterBuffer, min_area: usize) -> Vec<Blob> {
    let map = label_components(mask);
    let (blobs, _) = measure(&map, min_area);

    debug!(
        "Found {} blobs of {} components",
        blobs.len(),
        map.components
    );
    blobs
}

/// Measure every component, returning kept blobs and their component ids
pub(crate) fn measure(map: &LabelMap, min_area: usize) -> (Vec<Blob>, Vec<usize>) {
    let (width, height) = (map.width, map.height);

    let mut stats: Vec<Accumulator> = (0..map.components)
        .map(|_| Accumulator {
            area:      0,
            sum_x:     0.0,
            sum_y:     0.0,
            min_x:     usize::MAX,
            min_y:     usize::MAX,
            max_x:     0,
            max_y:     0,
            perimeter: 0
        })
        .collect();

    for y in 0..height {
        for x in 0..width {
            let label = map.label_at(x, y);

            if label == 0 {
                continue;
            }
            let missing = [
                y == 0 || map.label_at(x, y - 1) == 0,
                y + 1 == height || map.label_at(x, y + 1) == 0,
                x == 0 || map.label_at(x - 1, y) == 0,
                x + 1 == width || map.label_at(x + 1, y) == 0
            ]
            .iter()
            .filter(|x| **x)
            .count();

            let acc = &mut stats[label - 1];
            acc.area += 1;
            acc.sum_x += x as f64;
            acc.sum_y += y as f64;
            acc.min_x = acc.min_x.min(x);
            acc.min_y = acc.min_y.min(y);
            acc.max_x = acc.max_x.max(x);
            acc.max_y = acc.max_y.max(y);
            acc.perimeter += missing;
        }
    }

    let mut blobs = Vec::new();
    let mut ids = Vec::new();

    for (i, acc) in stats.iter().enumerate() {
        if acc.area < min_area {
            continue;
        }
        let area = acc.area as f64;
        let perimeter = acc.perimeter as f64;

        blobs.push(Blob {
            label:        blobs.len() + 1,
            area:         acc.area,
            centroid:     (acc.sum_x / area, acc.sum_y / area),
            bounding_box: BoundingBox::new(
                acc.min_x,
                acc.min_y,
                acc.max_x - acc.min_x + 1,
                acc.max_y - acc.min_y + 1
            ),
            perimeter:    acc.perimeter,
            circularity:  4.0 * PI * area / (perimeter * perimeter)
        });
        ids.push(i + 1);
    }
    (blobs, ids)
}

#[cfg(test)]
mod tests {
    use zune_raster::buffer::{RasterBuffer, Rgba};

    use crate::detect::blobs::{detect_blobs, label_components};

    #[test]
    fn test_u_shape_merges() {
        // the two arms only meet at the bottom, forcing an equivalence
        let mask = RasterBuffer::from_fn(5, 4, |x, y| {
            if y == 3 || x == 0 || x == 4 {
                Rgba::WHITE
            } else {
                Rgba::BLACK
            }
        })
        .unwrap();

        let map = label_components(&mask);
        assert_eq!(map.components, 1);

        let blobs = detect_blobs(&mask, 1);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].area, 11);
    }

    #[test]
    fn test_diagonal_is_not_connected() {
        let mask =
            RasterBuffer::from_fn(2, 2, |x, y| if x == y { Rgba::WHITE } else { Rgba::BLACK })
                .unwrap();

        assert_eq!(detect_blobs(&mask, 1).len(), 2);
    }

    #[test]
    fn test_single_pixel() {
        let mut mask = RasterBuffer::fill(Rgba::BLACK, 3, 3).unwrap();
        mask.set_pixel(1, 1, Rgba::WHITE).unwrap();

        let blobs = detect_blobs(&mask, 1);

        assert_eq!(blobs[0].perimeter, 4);
        assert_eq!(blobs[0].centroid, (1.0, 1.0));
        assert!((blobs[0].circularity - std::f64::consts::PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_area_filters_and_renumbers() {
        let mask = RasterBuffer::from_fn(10, 1, |x, _| {
            if x == 0 || (4..9).contains(&x) {
                Rgba::WHITE
            } else {
                Rgba::BLACK
            }
        })
        .unwrap();

        let blobs = detect_blobs(&mask, 2);

        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].label, 1);
        assert_eq!(blobs[0].area, 5);
    }
}
