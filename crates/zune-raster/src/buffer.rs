/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single raster buffer
//!
//! A raster buffer is represented as
//!
//! - interleaved RGBA pixels
//!     - each sample being 8 bits
//!         - with the first pixel at the top left corner
//!
//! Coordinates are zero indexed, `x` grows to the right and `y` grows downwards.
//!
//! Buffers are plain values, cloning one gives a fully independent copy.
use crate::colorspace::luma;
use crate::errors::RasterErrors;

/// Number of samples in a single pixel
pub const CHANNELS: usize = 4;

/// A single RGBA pixel
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8
}

impl Rgba {
    /// Fully opaque white
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    /// Fully opaque black
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Transparent black, the value of freshly allocated buffers
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }
    /// Create an opaque pixel
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
        Rgba { r, g, b, a: 255 }
    }
    /// Create an opaque gray pixel with all color channels set to `value`
    #[must_use]
    pub const fn gray(value: u8) -> Rgba {
        Rgba::rgb(value, value, value)
    }
    /// Luma of this pixel, `0.299r + 0.587g + 0.114b`
    #[must_use]
    pub fn luma(&self) -> f32 {
        luma(self.r, self.g, self.b)
    }

    #[must_use]
    pub const fn to_array(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }

    #[must_use]
    pub const fn from_array(array: [u8; CHANNELS]) -> Rgba {
        Rgba::new(array[0], array[1], array[2], array[3])
    }
}

/// An owned grid of RGBA pixels
///
/// The invariant `pixels.len() == width * height * 4` holds for every
/// buffer that can be observed from outside this module.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RasterBuffer {
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

impl RasterBuffer {
    /// Allocate a new blank buffer, every pixel is transparent black
    ///
    /// # Errors
    /// - [`RasterErrors::InvalidParameter`] if either dimension is zero
    pub fn new(width: usize, height: usize) -> Result<RasterBuffer, RasterErrors> {
        RasterBuffer::fill(Rgba::TRANSPARENT, width, height)
    }

    /// Create a buffer where every pixel has the same value
    ///
    /// # Errors
    /// - [`RasterErrors::InvalidParameter`] if either dimension is zero
    pub fn fill(pixel: Rgba, width: usize, height: usize) -> Result<RasterBuffer, RasterErrors> {
        check_dimensions(width, height)?;

        let mut pixels = vec![0; width * height * CHANNELS];

        for chunk in pixels.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel.to_array());
        }
        Ok(RasterBuffer {
            width,
            height,
            pixels
        })
    }

    /// Create a buffer from a function
    ///
    /// The function receives the `x` and `y` coordinate of every pixel and
    /// returns its value, pixels are visited in row major order.
    ///
    /// # Example
    /// ```
    /// use zune_raster::buffer::{RasterBuffer, Rgba};
    ///
    /// // a horizontal band from black to white
    /// let buffer = RasterBuffer::from_fn(256, 10, |x, _| Rgba::gray(x as u8)).unwrap();
    /// assert_eq!(buffer.get_pixel(255, 3).unwrap(), Rgba::gray(255));
    /// ```
    ///
    /// # Errors
    /// - [`RasterErrors::InvalidParameter`] if either dimension is zero
    pub fn from_fn<F>(width: usize, height: usize, mut func: F) -> Result<RasterBuffer, RasterErrors>
    where
        F: FnMut(usize, usize) -> Rgba
    {
        check_dimensions(width, height)?;

        let mut pixels = Vec::with_capacity(width * height * CHANNELS);

        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&func(x, y).to_array());
            }
        }
        Ok(RasterBuffer {
            width,
            height,
            pixels
        })
    }

    /// Create a buffer from interleaved RGBA bytes
    ///
    /// # Errors
    /// - [`RasterErrors::InvalidParameter`] if either dimension is zero
    /// - [`RasterErrors::DimensionMismatch`] if `pixels` is not `width*height*4` bytes long
    pub fn from_rgba(
        pixels: Vec<u8>, width: usize, height: usize
    ) -> Result<RasterBuffer, RasterErrors> {
        check_dimensions(width, height)?;

        if pixels.len() != width * height * CHANNELS {
            return Err(RasterErrors::DimensionMismatch(format!(
                "Expected {} bytes for a {width}x{height} RGBA buffer but found {}",
                width * height * CHANNELS,
                pixels.len()
            )));
        }
        Ok(RasterBuffer {
            width,
            height,
            pixels
        })
    }

    /// Create an opaque gray buffer from a single channel of intensities
    ///
    /// Values are rounded and clamped to `[0,255]`.
    ///
    /// # Errors
    /// - [`RasterErrors::DimensionMismatch`] if `plane` is not `width*height` long
    pub fn from_luma_plane(
        plane: &[f32], width: usize, height: usize
    ) -> Result<RasterBuffer, RasterErrors> {
        check_dimensions(width, height)?;

        if plane.len() != width * height {
            return Err(RasterErrors::DimensionMismatch(format!(
                "Expected {} samples for a {width}x{height} plane but found {}",
                width * height,
                plane.len()
            )));
        }
        let mut pixels = Vec::with_capacity(width * height * CHANNELS);

        for value in plane {
            let v = clamp_u8(*value);
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
        Ok(RasterBuffer {
            width,
            height,
            pixels
        })
    }

    /// Get buffer dimensions as a tuple of (width,height)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the pixel at `(x,y)`
    ///
    /// # Errors
    /// - [`RasterErrors::OutOfBounds`] if the coordinate is outside the buffer
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Rgba, RasterErrors> {
        let offset = self.offset(x, y)?;

        Ok(Rgba::from_array(
            self.pixels[offset..offset + CHANNELS].try_into().unwrap_or([0; CHANNELS])
        ))
    }

    /// Set the pixel at `(x,y)`
    ///
    /// # Errors
    /// - [`RasterErrors::OutOfBounds`] if the coordinate is outside the buffer
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Rgba) -> Result<(), RasterErrors> {
        let offset = self.offset(x, y)?;

        self.pixels[offset..offset + CHANNELS].copy_from_slice(&pixel.to_array());
        Ok(())
    }

    /// Return pixels as an array of RGBA quadruplets, in row major order
    #[must_use]
    pub fn pixels(&self) -> &[[u8; CHANNELS]] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Return mutable pixels as an array of RGBA quadruplets, in row major order
    pub fn pixels_mut(&mut self) -> &mut [[u8; CHANNELS]] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    /// Raw interleaved RGBA bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable raw interleaved RGBA bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer returning the interleaved RGBA bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Return the luma of every pixel as a row major plane
    ///
    /// The values are not rounded, they lie in `[0,255]`
    #[must_use]
    pub fn luma_plane(&self) -> Vec<f32> {
        self.pixels()
            .iter()
            .map(|pix| luma(pix[0], pix[1], pix[2]))
            .collect()
    }

    /// Replace the contents of this buffer, possibly with new dimensions
    ///
    /// Used by operations that change the dimensions of an image
    pub(crate) fn replace(&mut self, pixels: Vec<u8>, width: usize, height: usize) {
        debug_assert_eq!(pixels.len(), width * height * CHANNELS);

        self.pixels = pixels;
        self.width = width;
        self.height = height;
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize, RasterErrors> {
        if x >= self.width || y >= self.height {
            return Err(RasterErrors::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height
            });
        }
        Ok((y * self.width + x) * CHANNELS)
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), RasterErrors> {
    if width == 0 || height == 0 {
        return Err(RasterErrors::InvalidParameter(format!(
            "Buffer dimensions must be non zero, found {width}x{height}"
        )));
    }
    Ok(())
}

/// Round and clamp a float sample to the `u8` range
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[test]
fn test_new_is_transparent_black() {
    let buffer = RasterBuffer::new(3, 2).unwrap();

    assert_eq!(buffer.dimensions(), (3, 2));
    assert_eq!(buffer.as_bytes().len(), 3 * 2 * CHANNELS);
    assert!(buffer.pixels().iter().all(|x| *x == [0; 4]));
}

#[test]
fn test_zero_dimensions_rejected() {
    assert!(matches!(
        RasterBuffer::new(0, 10),
        Err(RasterErrors::InvalidParameter(_))
    ));
}

#[test]
fn test_set_rgb_pixel_is_opaque() {
    let mut buffer = RasterBuffer::new(2, 2).unwrap();

    buffer.set_pixel(1, 1, Rgba::rgb(9, 8, 7)).unwrap();
    assert_eq!(buffer.get_pixel(1, 1).unwrap(), Rgba::new(9, 8, 7, 255));
    // untouched pixels stay transparent
    assert_eq!(buffer.get_pixel(0, 0).unwrap().a, 0);
}

#[test]
fn test_set_get_pixel_bounds() {
    let mut buffer = RasterBuffer::new(4, 4).unwrap();
    let pixel = Rgba::new(1, 2, 3, 4);

    buffer.set_pixel(3, 2, pixel).unwrap();
    assert_eq!(buffer.get_pixel(3, 2).unwrap(), pixel);

    assert!(matches!(
        buffer.get_pixel(4, 0),
        Err(RasterErrors::OutOfBounds { x: 4, y: 0, .. })
    ));
    assert!(buffer.set_pixel(0, 4, pixel).is_err());
}

#[test]
fn test_clone_is_independent() {
    let original = RasterBuffer::fill(Rgba::WHITE, 2, 2).unwrap();
    let mut copy = original.clone();

    copy.set_pixel(0, 0, Rgba::BLACK).unwrap();

    assert_eq!(original.get_pixel(0, 0).unwrap(), Rgba::WHITE);
}
