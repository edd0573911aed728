/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Convert an image to grayscale
use crate::buffer::{clamp_u8, RasterBuffer};
use crate::colorspace::luma;
use crate::errors::RasterErrors;
use crate::traits::OperationsTrait;

/// Replace the color channels of every pixel with its luma
///
/// The luma is `0.299r + 0.587g + 0.114b` rounded to the nearest integer,
/// the alpha channel is not modified.
#[derive(Default, Copy, Clone)]
pub struct Grayscale;

impl Grayscale {
    #[must_use]
    pub fn new() -> Grayscale {
        Grayscale
    }
}

impl OperationsTrait for Grayscale {
    fn name(&self) -> &'static str {
        "Grayscale"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        rgba_to_grayscale(buffer.pixels_mut());
        Ok(())
    }
}

/// Convert RGBA pixels to gray in place
pub fn rgba_to_grayscale(pixels: &mut [[u8; 4]]) {
    for pix in pixels {
        let gray = luma_u8(pix[0], pix[1], pix[2]);

        pix[0] = gray;
        pix[1] = gray;
        pix[2] = gray;
    }
}

/// Rounded luma of an RGB triple
#[inline]
#[must_use]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    clamp_u8(luma(r, g, b))
}

#[cfg(test)]
mod tests {
    use crate::buffer::{RasterBuffer, Rgba};
    use crate::grayscale::Grayscale;
    use crate::traits::OperationsTrait;

    #[test]
    fn test_grayscale_keeps_alpha() {
        let mut buffer = RasterBuffer::fill(Rgba::new(255, 0, 0, 77), 4, 4).unwrap();
        Grayscale::new().execute(&mut buffer).unwrap();

        // 0.299 * 255 = 76.245
        assert_eq!(buffer.get_pixel(2, 2).unwrap(), Rgba::new(76, 76, 76, 77));
    }

    #[test]
    fn test_grayscale_idempotent() {
        let buffer = RasterBuffer::from_fn(16, 16, |x, y| {
            Rgba::rgb((x * 16) as u8, (y * 16) as u8, 200)
        })
        .unwrap();
        let once = Grayscale::new().clone_and_execute(&buffer).unwrap();
        let twice = Grayscale::new().clone_and_execute(&once).unwrap();

        assert_eq!(once, twice);
        assert_ne!(once, buffer);
    }
}

#[cfg(feature = "benchmarks")]
#[cfg(test)]
mod benchmarks {
    extern crate test;

    use crate::grayscale::rgba_to_grayscale;

    #[bench]
    fn grayscale_rgba_bench(b: &mut test::Bencher) {
        let width = 800;
        let height = 800;

        let mut pixels = vec![[23_u8, 100, 240, 255]; width * height];

        b.iter(|| {
            rgba_to_grayscale(&mut pixels);
        });
    }
}
