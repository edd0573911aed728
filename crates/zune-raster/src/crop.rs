/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Crop an image
use crate::buffer::{RasterBuffer, CHANNELS};
use crate::errors::RasterErrors;
use crate::traits::OperationsTrait;

/// Keep only a rectangular region of an image
///
/// The region starts at `(x,y)` and must lie fully inside the image
/// ```
/// use zune_raster::buffer::RasterBuffer;
/// use zune_raster::crop::Crop;
/// use zune_raster::traits::OperationsTrait;
///
/// let mut buffer = RasterBuffer::new(100, 100).unwrap();
/// Crop::new(10, 10, 50, 20).execute(&mut buffer).unwrap();
/// assert_eq!(buffer.dimensions(), (50, 20));
/// ```
#[derive(Copy, Clone)]
pub struct Crop {
    x:      usize,
    y:      usize,
    width:  usize,
    height: usize
}

impl Crop {
    #[must_use]
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Crop {
        Crop {
            x,
            y,
            width,
            height
        }
    }
}

impl OperationsTrait for Crop {
    fn name(&self) -> &'static str {
        "Crop"
    }

    fn execute_impl(&self, buffer: &mut RasterBuffer) -> Result<(), RasterErrors> {
        let out = crop(buffer, self.x, self.y, self.width, self.height)?;
        *buffer = out;
        Ok(())
    }
}

/// Copy a region of `buffer` into a new buffer
///
/// # Errors
/// - [`RasterErrors::InvalidParameter`] if the region is empty
/// - [`RasterErrors::OutOfBounds`] if the region extends past the image
pub fn crop(
    buffer: &RasterBuffer, x: usize, y: usize, width: usize, height: usize
) -> Result<RasterBuffer, RasterErrors> {
    if width == 0 || height == 0 {
        return Err(RasterErrors::InvalidParameter(format!(
            "Crop region must be non empty, found {width}x{height}"
        )));
    }
    let (in_width, in_height) = buffer.dimensions();

    if x + width > in_width || y + height > in_height {
        return Err(RasterErrors::OutOfBounds {
            x:      x + width - 1,
            y:      y + height - 1,
            width:  in_width,
            height: in_height
        });
    }
    let in_stride = in_width * CHANNELS;
    let out_stride = width * CHANNELS;
    let mut out = Vec::with_capacity(out_stride * height);

    for row in buffer
        .as_bytes()
        .chunks_exact(in_stride)
        .skip(y)
        .take(height)
    {
        out.extend_from_slice(&row[x * CHANNELS..x * CHANNELS + out_stride]);
    }
    RasterBuffer::from_rgba(out, width, height)
}

#[cfg(test)]
mod tests {
    use crate::buffer::{RasterBuffer, Rgba};
    use crate::crop::crop;
    use crate::errors::RasterErrors;

    #[test]
    fn test_crop_copies_region() {
        let buffer =
            RasterBuffer::from_fn(10, 10, |x, y| Rgba::rgb(x as u8, y as u8, 0)).unwrap();
        let out = crop(&buffer, 3, 4, 2, 5).unwrap();

        assert_eq!(out.dimensions(), (2, 5));
        assert_eq!(out.get_pixel(0, 0).unwrap(), Rgba::rgb(3, 4, 0));
        assert_eq!(out.get_pixel(1, 4).unwrap(), Rgba::rgb(4, 8, 0));
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let buffer = RasterBuffer::new(10, 10).unwrap();

        assert!(matches!(
            crop(&buffer, 5, 5, 6, 1),
            Err(RasterErrors::OutOfBounds { .. })
        ));
    }
}
