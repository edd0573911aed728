/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Escape time fractals
//!
//! A pixel is iterated until `|z|² > 4` or the iteration limit is reached.
//! Points that never escape are black, the others are colored by a hue
//! proportional to the number of iterations they took.
use num_complex::Complex64;
use zune_core::log::{debug, trace};
use zune_raster::buffer::{RasterBuffer, Rgba, CHANNELS};
use zune_raster::cancel::CancelToken;
use zune_raster::colorspace::hsv_to_rgb;
use zune_raster::errors::RasterErrors;

/// Escape radius squared
const BOUND: f64 = 4.0;

/// Width of the complex plane covered by the shorter image side at zoom 1
const VIEW_SPAN: f64 = 3.0;

/// Constant producing the classic Julia "dragon"
pub const DEFAULT_JULIA_CONSTANT: Complex64 = Complex64::new(-0.7, 0.27015);

/// Viewport and iteration settings
#[derive(Clone, Debug)]
pub struct FractalOptions {
    center:         (f64, f64),
    zoom:           f64,
    max_iterations: usize,
    cancel:         CancelToken
}

impl Default for FractalOptions {
    fn default() -> Self {
        FractalOptions {
            center:         (-0.5, 0.0),
            zoom:           1.0,
            max_iterations: 100,
            cancel:         CancelToken::default()
        }
    }
}

impl FractalOptions {
    /// Point of the complex plane at the center pixel, as `(re, im)`
    #[must_use]
    pub fn set_center(mut self, re: f64, im: f64) -> Self {
        self.center = (re, im);
        self
    }
    #[must_use]
    pub fn set_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }
    #[must_use]
    pub fn set_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }
    /// Token checked before every row
    #[must_use]
    pub fn set_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    fn validate(&self) -> Result<(), RasterErrors> {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(RasterErrors::InvalidParameter(format!(
                "Zoom must be positive, got {}",
                self.zoom
            )));
        }
        if self.max_iterations == 0 {
            return Err(RasterErrors::InvalidParameter(
                "Fractals need at least one iteration".to_string()
            ));
        }
        Ok(())
    }
}

/// Number of iterations before `z` escapes, `None` if it never does
fn escape_time(mut z: Complex64, c: Complex64, max_iterations: usize) -> Option<usize> {
    for i in 0..max_iterations {
        if z.norm_sqr() > BOUND {
            return Some(i);
        }
        z = z * z + c;
    }
    None
}

#[allow(clippy::cast_possible_truncation)]
fn color(iterations: Option<usize>, max_iterations: usize) -> Rgba {
    match iterations {
        None => Rgba::BLACK,
        Some(i) => {
            let hue = 360.0 * i as f64 / max_iterations as f64;
            let (r, g, b) = hsv_to_rgb(hue as f32, 100.0, 100.0);
            Rgba::rgb(r, g, b)
        }
    }
}

/// Render by evaluating `iterate` at the plane position of every pixel
fn render<F: Fn(Complex64) -> Option<usize>>(
    name: &'static str, width: usize, height: usize, options: &FractalOptions, iterate: F
) -> Result<RasterBuffer, RasterErrors> {
    options.validate()?;

    let mut buffer = RasterBuffer::new(width, height)?;
    let step = VIEW_SPAN / (options.zoom * width.min(height) as f64);
    let (cx, cy) = options.center;

    trace!(
        "Rendering {} at ({}, {}) with step {}",
        name,
        cx,
        cy,
        step
    );

    // pixel (width/2, height/2) lands exactly on the center
    let half_w = (width / 2) as f64;
    let half_h = (height / 2) as f64;

    for (y, row) in buffer
        .as_bytes_mut()
        .chunks_exact_mut(width * CHANNELS)
        .enumerate()
    {
        options.cancel.check(name)?;

        let im = cy + (y as f64 - half_h) * step;

        for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let re = cx + (x as f64 - half_w) * step;
            let value = color(iterate(Complex64::new(re, im)), options.max_iterations);

            pixel.copy_from_slice(&value.to_array());
        }
    }
    debug!("Rendered {}x{} {}", width, height, name);

    Ok(buffer)
}

/// Render the Mandelbrot set, `z₀ = 0`, `c` is the pixel position
///
/// # Errors
/// - [`RasterErrors::InvalidParameter`] on a zero dimension, a non positive zoom or zero iterations
/// - [`RasterErrors::Cancelled`] if the token fires
pub fn mandelbrot(
    width: usize, height: usize, options: &FractalOptions
) -> Result<RasterBuffer, RasterErrors> {
    let max = options.max_iterations;

    render("Mandelbrot", width, height, options, |c| {
        escape_time(Complex64::new(0.0, 0.0), c, max)
    })
}

/// Render the Julia set of `c`, `z₀` is the pixel position
///
/// # Errors
/// - [`RasterErrors::InvalidParameter`] on a zero dimension, a non positive zoom or zero iterations
/// - [`RasterErrors::Cancelled`] if the token fires
pub fn julia(
    width: usize, height: usize, c: Complex64, options: &FractalOptions
) -> Result<RasterBuffer, RasterErrors> {
    let max = options.max_iterations;

    render("Julia", width, height, options, |z| escape_time(z, c, max))
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use zune_raster::buffer::Rgba;
    use zune_raster::cancel::CancelToken;
    use zune_raster::errors::RasterErrors;

    use crate::generate::fractal::{
        escape_time, julia, mandelbrot, FractalOptions, DEFAULT_JULIA_CONSTANT
    };

    #[test]
    fn test_mandelbrot_center_is_interior() {
        let image = mandelbrot(64, 48, &FractalOptions::default()).unwrap();

        assert_eq!(image.get_pixel(32, 24).unwrap(), Rgba::BLACK);
        // far corner escapes immediately and is colored
        assert_ne!(image.get_pixel(0, 0).unwrap(), Rgba::BLACK);
    }

    #[test]
    fn test_escape_time() {
        assert_eq!(escape_time(Complex64::new(0.0, 0.0), Complex64::new(3.0, 0.0), 100), Some(1));
        assert_eq!(escape_time(Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0), 100), None);
    }

    #[test]
    fn test_julia_renders() {
        let options = FractalOptions::default().set_center(0.0, 0.0);
        let image = julia(32, 32, DEFAULT_JULIA_CONSTANT, &options).unwrap();

        assert_eq!(image.dimensions(), (32, 32));
        assert!(image.pixels().iter().all(|x| x[3] == 255));
    }

    #[test]
    fn test_cancel_and_invalid() {
        let token = CancelToken::new();
        token.cancel();
        let options = FractalOptions::default().set_cancel_token(token);

        assert!(matches!(
            mandelbrot(8, 8, &options),
            Err(RasterErrors::Cancelled(_))
        ));
        assert!(mandelbrot(8, 8, &FractalOptions::default().set_zoom(0.0)).is_err());
        assert!(mandelbrot(8, 8, &FractalOptions::default().set_max_iterations(0)).is_err());
    }
}
