/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Color based segmentation into binary masks
//!
//! Matching pixels become opaque white, the rest opaque black. Masks feed
//! straight into [`detect_blobs`](crate::detect::detect_blobs)
use zune_raster::buffer::{RasterBuffer, Rgba};
use zune_raster::colorspace::rgb_to_hsv;

/// Inclusive HSV bounds
///
/// Hue is in degrees `[0, 360)`, saturation and value in `[0, 100]`.
/// When `h_min > h_max` the hue range wraps through 0, so `(340, 20)` selects reds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HsvRange {
    pub h_min: f32,
    pub h_max: f32,
    pub s_min: f32,
    pub s_max: f32,
    pub v_min: f32,
    pub v_max: f32
}

impl HsvRange {
    #[must_use]
    pub const fn new(hue: (f32, f32), saturation: (f32, f32), value: (f32, f32)) -> HsvRange {
        HsvRange {
            h_min: hue.0,
            h_max: hue.1,
            s_min: saturation.0,
            s_max: saturation.1,
            v_min: value.0,
            v_max: value.1
        }
    }

    #[must_use]
    pub fn contains(&self, h: f32, s: f32, v: f32) -> bool {
        let hue = if self.h_min <= self.h_max {
            (self.h_min..=self.h_max).contains(&h)
        } else {
            h >= self.h_min || h <= self.h_max
        };
        hue && (self.s_min..=self.s_max).contains(&s) && (self.v_min..=self.v_max).contains(&v)
    }
}

fn mask_by<F: Fn(&[u8; 4]) -> bool>(buffer: &RasterBuffer, keep: F) -> RasterBuffer {
    let mut mask = buffer.clone();

    for pixel in mask.pixels_mut() {
        let value = if keep(pixel) { Rgba::WHITE } else { Rgba::BLACK };
        *pixel = value.to_array();
    }
    mask
}

/// Select pixels within `tolerance` of `target`, by Euclidean RGB distance
#[must_use]
pub fn segment_by_color(buffer: &RasterBuffer, target: Rgba, tolerance: f64) -> RasterBuffer {
    mask_by(buffer, |pixel| {
        let distance = [
            f64::from(pixel[0]) - f64::from(target.r),
            f64::from(pixel[1]) - f64::from(target.g),
            f64::from(pixel[2]) - f64::from(target.b)
        ]
        .iter()
        .map(|x| x * x)
        .sum::<f64>()
        .sqrt();

        distance <= tolerance
    })
}

/// Select pixels whose HSV value falls in `range`
#[must_use]
pub fn segment_by_hsv(buffer: &RasterBuffer, range: &HsvRange) -> RasterBuffer {
    mask_by(buffer, |pixel| {
        let (h, s, v) = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
        range.contains(h, s, v)
    })
}

#[cfg(test)]
mod tests {
    use zune_raster::buffer::{RasterBuffer, Rgba};

    use crate::detect::segment::{segment_by_color, segment_by_hsv, HsvRange};

    fn stripes() -> RasterBuffer {
        RasterBuffer::from_fn(3, 1, |x, _| match x {
            0 => Rgba::rgb(250, 5, 5),
            1 => Rgba::rgb(0, 200, 0),
            _ => Rgba::rgb(250, 0, 40)
        })
        .unwrap()
    }

    #[test]
    fn test_color_tolerance() {
        let mask = segment_by_color(&stripes(), Rgba::rgb(255, 0, 0), 10.0);

        assert_eq!(mask.get_pixel(0, 0).unwrap(), Rgba::WHITE);
        assert_eq!(mask.get_pixel(1, 0).unwrap(), Rgba::BLACK);
        assert_eq!(mask.get_pixel(2, 0).unwrap(), Rgba::BLACK);
    }

    #[test]
    fn test_hue_wraps() {
        // pixel 0 has hue 0, pixel 2 has a hue just below 360
        let range = HsvRange::new((330.0, 10.0), (50.0, 100.0), (50.0, 100.0));
        let mask = segment_by_hsv(&stripes(), &range);

        assert_eq!(mask.get_pixel(0, 0).unwrap(), Rgba::WHITE);
        assert_eq!(mask.get_pixel(1, 0).unwrap(), Rgba::BLACK);
        assert_eq!(mask.get_pixel(2, 0).unwrap(), Rgba::WHITE);
    }
}
