/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Combine two images with the usual layer blend modes
use zune_core::log::trace;
use zune_raster::buffer::{clamp_u8, RasterBuffer};
use zune_raster::errors::RasterErrors;

/// How a top layer is combined with a base layer
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BlendMode {
    /// The top layer replaces the base
    Normal,
    Multiply,
    Screen,
    /// Multiply in the shadows of the base, screen in its highlights
    Overlay,
    Add,
    Subtract,
    Difference
}

impl BlendMode {
    /// Parse a mode from its lowercase name
    #[must_use]
    pub fn from_name(name: &str) -> Option<BlendMode> {
        match name.to_ascii_lowercase().as_str() {
            "normal" => Some(BlendMode::Normal),
            "multiply" => Some(BlendMode::Multiply),
            "screen" => Some(BlendMode::Screen),
            "overlay" => Some(BlendMode::Overlay),
            "add" => Some(BlendMode::Add),
            "subtract" => Some(BlendMode::Subtract),
            "difference" => Some(BlendMode::Difference),
            _ => None
        }
    }

    /// Combine one channel, the result may leave `[0, 255]`
    fn apply(self, base: f32, top: f32) -> f32 {
        match self {
            BlendMode::Normal => top,
            BlendMode::Multiply => base * top / 255.0,
            BlendMode::Screen => 255.0 - (255.0 - base) * (255.0 - top) / 255.0,
            BlendMode::Overlay => {
                if base < 128.0 {
                    2.0 * base * top / 255.0
                } else {
                    255.0 - 2.0 * (255.0 - base) * (255.0 - top) / 255.0
                }
            }
            BlendMode::Add => base + top,
            BlendMode::Subtract => base - top,
            BlendMode::Difference => (base - top).abs()
        }
    }
}

/// Blend `top` over `base`
///
/// The output covers the area common to both images. Each of r, g and b is
/// `base + (mode(base, top) - base) * opacity`, rounded and clamped, alpha
/// comes from `base`. Opacity is clamped to `[0, 1]`.
///
/// # Errors
/// Only from allocating the output
pub fn blend(
    base: &RasterBuffer, top: &RasterBuffer, mode: BlendMode, opacity: f32
) -> Result<RasterBuffer, RasterErrors> {
    let opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };

    let width = base.width().min(top.width());
    let height = base.height().min(top.height());

    trace!("Blending {}x{} with {:?} at {}", width, height, mode, opacity);

    let base_pixels = base.pixels();
    let top_pixels = top.pixels();

    let mut out = Vec::with_capacity(width * height * 4);

    for y in 0..height {
        let base_row = &base_pixels[y * base.width()..y * base.width() + width];
        let top_row = &top_pixels[y * top.width()..y * top.width() + width];

        for (b, t) in base_row.iter().zip(top_row) {
            for c in 0..3 {
                let a = f32::from(b[c]);
                let mixed = a + (mode.apply(a, f32::from(t[c])) - a) * opacity;
                out.push(clamp_u8(mixed));
            }
            out.push(b[3]);
        }
    }
    RasterBuffer::from_rgba(out, width, height)
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};
    use zune_raster::buffer::{RasterBuffer, Rgba};

    use crate::generate::blend::{blend, BlendMode};

    fn noise(seed: u64) -> RasterBuffer {
        let mut rng = WyRand::new_seed(seed);
        RasterBuffer::from_fn(12, 9, |_, _| {
            Rgba::new(rng.generate(), rng.generate(), rng.generate(), rng.generate())
        })
        .unwrap()
    }

    #[test]
    fn test_zero_opacity_is_base() {
        let base = noise(1);
        let top = noise(2);

        for mode in [BlendMode::Normal, BlendMode::Add, BlendMode::Overlay] {
            assert_eq!(blend(&base, &top, mode, 0.0).unwrap(), base);
        }
    }

    #[test]
    fn test_difference_with_self_is_black() {
        let base = noise(3);
        let out = blend(&base, &base, BlendMode::Difference, 1.0).unwrap();

        for (o, b) in out.pixels().iter().zip(base.pixels()) {
            assert_eq!(o[..3], [0, 0, 0]);
            assert_eq!(o[3], b[3]);
        }
    }

    #[test]
    fn test_modes() {
        let base = RasterBuffer::fill(Rgba::rgb(200, 100, 50), 2, 2).unwrap();
        let top = RasterBuffer::fill(Rgba::rgb(100, 200, 250), 3, 1).unwrap();

        let add = blend(&base, &top, BlendMode::Add, 1.0).unwrap();
        assert_eq!(add.dimensions(), (2, 1));
        assert_eq!(add.get_pixel(0, 0).unwrap(), Rgba::rgb(255, 255, 255));

        let sub = blend(&base, &top, BlendMode::Subtract, 1.0).unwrap();
        assert_eq!(sub.get_pixel(1, 0).unwrap(), Rgba::rgb(100, 0, 0));

        let multiply = blend(&base, &top, BlendMode::Multiply, 1.0).unwrap();
        // 200 * 100 / 255 = 78.4
        assert_eq!(multiply.get_pixel(0, 0).unwrap().r, 78);

        let normal = blend(&base, &top, BlendMode::Normal, 0.5).unwrap();
        assert_eq!(normal.get_pixel(0, 0).unwrap(), Rgba::rgb(150, 150, 150));

        assert_eq!(BlendMode::from_name("Screen"), Some(BlendMode::Screen));
        assert_eq!(BlendMode::from_name("dodge"), None);
    }
}
