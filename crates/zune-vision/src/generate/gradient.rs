/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Linear and radial color gradients
use zune_raster::buffer::{clamp_u8, RasterBuffer, Rgba};
use zune_raster::errors::RasterErrors;

/// Interpolate every channel between `start` and `end`
#[allow(clippy::cast_possible_truncation)]
fn mix(start: Rgba, end: Rgba, t: f64) -> Rgba {
    let channel = |a: u8, b: u8| {
        let (a, b) = (f64::from(a), f64::from(b));
        clamp_u8((a + (b - a) * t) as f32)
    };

    Rgba::new(
        channel(start.r, end.r),
        channel(start.g, end.g),
        channel(start.b, end.b),
        channel(start.a, end.a)
    )
}

/// A gradient running along `angle` degrees
///
/// An angle of 0 goes from left (`start`) to right (`end`), 90 from top to bottom.
/// The extreme corners of the image along the direction get the pure colors.
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if a dimension is zero
pub fn linear_gradient(
    width: usize, height: usize, angle: f64, start: Rgba, end: Rgba
) -> Result<RasterBuffer, RasterErrors> {
    let (sin, cos) = angle.to_radians().sin_cos();
    let project = |x: f64, y: f64| x * cos + y * sin;

    let w = width.saturating_sub(1) as f64;
    let h = height.saturating_sub(1) as f64;
    let corners = [project(0.0, 0.0), project(w, 0.0), project(0.0, h), project(w, h)];

    let min = corners.iter().copied().fold(f64::INFINITY, f64::min);
    let max = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    RasterBuffer::from_fn(width, height, |x, y| {
        let t = if range == 0.0 {
            0.0
        } else {
            (project(x as f64, y as f64) - min) / range
        };
        mix(start, end, t)
    })
}

/// A gradient from `center` in the middle of the image to `edge` at the farthest corner
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if a dimension is zero
pub fn radial_gradient(
    width: usize, height: usize, center: Rgba, edge: Rgba
) -> Result<RasterBuffer, RasterErrors> {
    let cx = width.saturating_sub(1) as f64 / 2.0;
    let cy = height.saturating_sub(1) as f64 / 2.0;
    // every corner is equally far from the middle
    let max_distance = cx.hypot(cy);

    RasterBuffer::from_fn(width, height, |x, y| {
        let t = if max_distance == 0.0 {
            0.0
        } else {
            (x as f64 - cx).hypot(y as f64 - cy) / max_distance
        };
        mix(center, edge, t)
    })
}

#[cfg(test)]
mod tests {
    use zune_raster::buffer::Rgba;

    use crate::generate::gradient::{linear_gradient, radial_gradient};

    #[test]
    fn test_horizontal_gradient() {
        let image = linear_gradient(11, 3, 0.0, Rgba::BLACK, Rgba::WHITE).unwrap();

        assert_eq!(image.get_pixel(0, 1).unwrap(), Rgba::BLACK);
        assert_eq!(image.get_pixel(10, 1).unwrap(), Rgba::WHITE);
        assert_eq!(image.get_pixel(5, 2).unwrap(), Rgba::gray(128));
    }

    #[test]
    fn test_vertical_gradient() {
        let image = linear_gradient(4, 5, 90.0, Rgba::BLACK, Rgba::WHITE).unwrap();

        for x in 0..4 {
            assert_eq!(image.get_pixel(x, 0).unwrap(), Rgba::BLACK);
            assert_eq!(image.get_pixel(x, 4).unwrap(), Rgba::WHITE);
        }
    }

    #[test]
    fn test_radial_gradient() {
        let image = radial_gradient(9, 9, Rgba::WHITE, Rgba::BLACK).unwrap();

        assert_eq!(image.get_pixel(4, 4).unwrap(), Rgba::WHITE);
        assert_eq!(image.get_pixel(0, 0).unwrap(), Rgba::BLACK);
        assert_eq!(image.get_pixel(8, 8).unwrap(), Rgba::BLACK);

        let single = radial_gradient(1, 1, Rgba::WHITE, Rgba::BLACK).unwrap();
        assert_eq!(single.get_pixel(0, 0).unwrap(), Rgba::WHITE);
    }
}
