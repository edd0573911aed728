/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Grayscale morphology over a square structuring element
//!
//! The element is `size x size` pixels centred on the output pixel,
//! samples falling outside the image are ignored. Only r, g and b are
//! filtered, alpha is copied.
use zune_raster::buffer::RasterBuffer;
use zune_raster::errors::RasterErrors;
use zune_raster::traits::OperationsTrait;

#[derive(Copy, Clone)]
enum MorphOp {
    Min,
    Max
}

impl MorphOp {
    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            MorphOp::Min => a.min(b),
            MorphOp::Max => a.max(b)
        }
    }
}

/// Erode an image, shrinking bright regions
#[derive(Copy, Clone)]
pub struct Erode {
    size: usize
}

impl Erode {
    #[must_use]
    pub fn new(size: usize) -> Erode {
        Erode { size }
    }
}

impl OperationsTrait for Erode {
    fn name(&self) -> &'static str {
        "Erode"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        morph(buffer, self.size, MorphOp::Min)
    }
}

/// Dilate an image, growing bright regions
#[derive(Copy, Clone)]
pub struct Dilate {
    size: usize
}

impl Dilate {
    #[must_use]
    pub fn new(size: usize) -> Dilate {
        Dilate { size }
    }
}

impl OperationsTrait for Dilate {
    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        morph(buffer, self.size, MorphOp::Max)
    }
}

/// Erosion followed by dilation, removes small bright specks
#[derive(Copy, Clone)]
pub struct Opening {
    size: usize
}

impl Opening {
    #[must_use]
    pub fn new(size: usize) -> Opening {
        Opening { size }
    }
}

impl OperationsTrait for Opening {
    fn name(&self) -> &'static str {
        "Opening"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        morph(buffer, self.size, MorphOp::Min)?;
        morph(buffer, self.size, MorphOp::Max)
    }
}

/// Dilation followed by erosion, fills small dark holes
#[derive(Copy, Clone)]
pub struct Closing {
    size: usize
}

impl Closing {
    #[must_use]
    pub fn new(size: usize) -> Closing {
        Closing { size }
    }
}

impl OperationsTrait for Closing {
    fn name(&self) -> &'static str {
        "Closing"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        morph(buffer, self.size, MorphOp::Max)?;
        morph(buffer, self.size, MorphOp::Min)
    }
}

/// Separable min/max filter, a row pass then a column pass
fn morph(buffer: &mut RasterBuffer, size: usize, op: MorphOp) -> Result<(), RasterErrors> {
    if size == 0 {
        return Err(RasterErrors::InvalidParameter(
            "Structuring element size must be at least 1".to_string()
        ));
    }
    if size == 1 {
        return Ok(());
    }
    let (width, height) = buffer.dimensions();
    let before = size / 2;
    let after = size - 1 - before;

    let src = buffer.pixels().to_vec();
    let mut rows = src.clone();

    for y in 0..height {
        for x in 0..width {
            let lo = x.saturating_sub(before);
            let hi = (x + after).min(width - 1);

            rows[y * width + x] =
                fold_window((lo..=hi).map(|sx| &src[y * width + sx]), src[y * width + x], op);
        }
    }

    let out = buffer.pixels_mut();

    for y in 0..height {
        let lo = y.saturating_sub(before);
        let hi = (y + after).min(height - 1);

        for x in 0..width {
            out[y * width + x] =
                fold_window((lo..=hi).map(|sy| &rows[sy * width + x]), src[y * width + x], op);
        }
    }
    Ok(())
}

/// Reduce r, g and b over a window, alpha comes from `center`
fn fold_window<'a, I: Iterator<Item = &'a [u8; 4]>>(
    window: I, center: [u8; 4], op: MorphOp
) -> [u8; 4] {
    let mut acc: Option<[u8; 4]> = None;

    for pixel in window {
        acc = Some(match acc {
            None => *pixel,
            Some(a) => [
                op.pick(a[0], pixel[0]),
                op.pick(a[1], pixel[1]),
                op.pick(a[2], pixel[2]),
                a[3]
            ]
        });
    }
    let mut result = acc.unwrap_or(center);
    result[3] = center[3];
    result
}

#[cfg(test)]
mod tests {
    use zune_raster::buffer::{RasterBuffer, Rgba};
    use zune_raster::traits::OperationsTrait;

    use crate::detect::morphology::{Closing, Dilate, Erode, Opening};

    fn dot() -> RasterBuffer {
        let mut image = RasterBuffer::fill(Rgba::BLACK, 7, 7).unwrap();
        image.set_pixel(3, 3, Rgba::WHITE).unwrap();
        image
    }

    fn count_white(image: &RasterBuffer) -> usize {
        image.pixels().iter().filter(|x| x[0] == 255).count()
    }

    #[test]
    fn test_dilate_grows() {
        let image = Dilate::new(3).clone_and_execute(&dot()).unwrap();
        assert_eq!(count_white(&image), 9);
    }

    #[test]
    fn test_erode_removes_dot() {
        let image = Erode::new(3).clone_and_execute(&dot()).unwrap();
        assert_eq!(count_white(&image), 0);
    }

    #[test]
    fn test_opening_and_closing() {
        // opening removes the isolated dot
        let opened = Opening::new(3).clone_and_execute(&dot()).unwrap();
        assert_eq!(count_white(&opened), 0);

        // closing fills a one pixel hole
        let mut holed = RasterBuffer::fill(Rgba::WHITE, 7, 7).unwrap();
        holed.set_pixel(3, 3, Rgba::BLACK).unwrap();
        let closed = Closing::new(3).clone_and_execute(&holed).unwrap();
        assert_eq!(count_white(&closed), 49);
    }

    #[test]
    fn test_edges_ignore_outside() {
        // a white image stays white under erosion, the border is not padded with black
        let white = RasterBuffer::fill(Rgba::WHITE, 5, 5).unwrap();
        let eroded = Erode::new(5).clone_and_execute(&white).unwrap();

        assert_eq!(count_white(&eroded), 25);
        assert!(Erode::new(0).clone_and_execute(&white).is_err());
    }
}
