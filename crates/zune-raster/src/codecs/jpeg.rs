/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! JPEG support, decoding via `zune-jpeg` and encoding via `jpeg-encoder`
use jpeg_encoder::{ColorType, Encoder};
use zune_core::bytestream::ZCursor;
use zune_core::colorspace::ColorSpace;
use zune_core::log::trace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

use crate::buffer::RasterBuffer;
use crate::codecs::expand_to_rgba;
use crate::errors::RasterErrors;

/// Decode a jpeg image to RGBA
///
/// # Errors
/// Any error from the jpeg decoder
pub fn decode_jpeg(bytes: &[u8]) -> Result<RasterBuffer, RasterErrors> {
    let options = DecoderOptions::default().jpeg_set_out_colorspace(ColorSpace::RGBA);

    let mut decoder = JpegDecoder::new_with_options(ZCursor::new(bytes), options);

    let pixels = decoder.decode()?;

    let info = decoder
        .info()
        .ok_or(RasterErrors::GenericStr("Jpeg headers were not decoded"))?;
    // grayscale images may be returned as luma regardless of the requested colorspace
    let colorspace = decoder.output_colorspace().unwrap_or(ColorSpace::RGBA);

    trace!("Jpeg decoder produced {:?} output", colorspace);

    expand_to_rgba(
        &pixels,
        colorspace,
        usize::from(info.width),
        usize::from(info.height)
    )
}

/// Encode a buffer as a baseline jpeg, alpha is discarded
///
/// # Arguments
/// - buffer: Image to encode
/// - quality: Jpeg quality, clamped to `1..=100`
///
/// # Errors
/// - [`RasterErrors::InvalidParameter`] if a dimension does not fit the jpeg header
/// - Encoder errors
pub fn encode_jpeg(buffer: &RasterBuffer, quality: u8) -> Result<Vec<u8>, RasterErrors> {
    let (width, height) = dimensions_u16(buffer, "jpeg")?;

    let mut out = Vec::new();

    let encoder = Encoder::new(&mut out, quality.clamp(1, 100));
    encoder.encode(buffer.as_bytes(), width, height, ColorType::Rgba)?;

    Ok(out)
}

/// Dimensions of `buffer` for formats that store them as 16 bit integers
pub(crate) fn dimensions_u16(
    buffer: &RasterBuffer, format: &str
) -> Result<(u16, u16), RasterErrors> {
    let (width, height) = buffer.dimensions();

    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(RasterErrors::InvalidParameter(format!(
            "{format} cannot store an image of {width}x{height}, dimensions are limited to 65535"
        )))
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::{RasterBuffer, Rgba};
    use crate::codecs::jpeg::{decode_jpeg, encode_jpeg};

    #[test]
    fn test_jpeg_roundtrip_dimensions() {
        let buffer = RasterBuffer::from_fn(37, 21, |x, y| {
            Rgba::rgb((x * 6) as u8, (y * 12) as u8, 128)
        })
        .unwrap();

        let encoded = encode_jpeg(&buffer, 90).unwrap();
        let decoded = decode_jpeg(&encoded).unwrap();

        assert_eq!(decoded.dimensions(), (37, 21));
        assert!(decoded.pixels().iter().all(|x| x[3] == 255));
    }

    #[test]
    fn test_jpeg_flat_color_survives() {
        let buffer = RasterBuffer::fill(Rgba::rgb(120, 120, 120), 16, 16).unwrap();
        let decoded = decode_jpeg(&encode_jpeg(&buffer, 100).unwrap()).unwrap();

        for pix in decoded.pixels() {
            assert!((i32::from(pix[0]) - 120).abs() <= 3);
        }
    }
}
