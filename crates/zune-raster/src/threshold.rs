/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Binary threshold
use crate::buffer::{RasterBuffer, Rgba};
use crate::errors::RasterErrors;
use crate::grayscale::luma_u8;
use crate::traits::OperationsTrait;

/// Turn an image into a black and white mask
///
/// Pixels whose rounded luma is at least `threshold` become opaque white,
/// everything else becomes opaque black.
#[derive(Copy, Clone)]
pub struct Threshold {
    threshold: u8
}

impl Threshold {
    #[must_use]
    pub fn new(threshold: u8) -> Threshold {
        Threshold { threshold }
    }
}

impl OperationsTrait for Threshold {
    fn name(&self) -> &'static str {
        "Threshold"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        for pix in buffer.pixels_mut() {
            *pix = if luma_u8(pix[0], pix[1], pix[2]) >= self.threshold {
                Rgba::WHITE.to_array()
            } else {
                Rgba::BLACK.to_array()
            };
        }
        Ok(())
    }
}

#[test]
fn test_threshold_is_binary() {
    let mut buffer = RasterBuffer::from_fn(256, 1, |x, _| Rgba::gray(x as u8)).unwrap();
    Threshold::new(128).execute(&mut buffer).unwrap();

    assert_eq!(buffer.get_pixel(127, 0).unwrap(), Rgba::BLACK);
    assert_eq!(buffer.get_pixel(128, 0).unwrap(), Rgba::WHITE);
    assert!(buffer
        .pixels()
        .iter()
        .all(|x| *x == [0, 0, 0, 255] || *x == [255; 4]));
}
