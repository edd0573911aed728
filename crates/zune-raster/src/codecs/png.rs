/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! PNG support via the `png` crate
use ::png::{BitDepth, ColorType, Compression, Decoder, Encoder, Transformations};
use zune_core::colorspace::ColorSpace;
use zune_core::log::trace;

use crate::buffer::RasterBuffer;
use crate::codecs::expand_to_rgba;
use crate::errors::RasterErrors;

/// Decode a png image to RGBA
///
/// Palette images are expanded and 16 bit images are stripped to 8 bits
///
/// # Errors
/// Any error from the png decoder
pub fn decode_png(bytes: &[u8]) -> Result<RasterBuffer, RasterErrors> {
    let mut decoder = Decoder::new(bytes);
    decoder.set_transformations(Transformations::normalize_to_color8());

    let mut reader = decoder.read_info()?;
    let mut pixels = vec![0; reader.output_buffer_size()];

    let info = reader.next_frame(&mut pixels)?;
    pixels.truncate(info.buffer_size());

    let colorspace = match info.color_type {
        ColorType::Grayscale => ColorSpace::Luma,
        ColorType::GrayscaleAlpha => ColorSpace::LumaA,
        ColorType::Rgb => ColorSpace::RGB,
        ColorType::Rgba => ColorSpace::RGBA,
        ColorType::Indexed => {
            return Err(RasterErrors::GenericStr(
                "Png palette was not expanded by the decoder"
            ))
        }
    };
    trace!("Png color type {:?} -> {:?}", info.color_type, colorspace);

    expand_to_rgba(
        &pixels,
        colorspace,
        info.width as usize,
        info.height as usize
    )
}

/// Map a `0..=100` quality to a png compression preset
///
/// The quality is first turned into a zlib style level `9 - round(quality*9/100)`,
/// levels 0-3 are fast, 4-6 default and 7-9 best.
#[must_use]
pub fn compression_for_quality(quality: u8) -> Compression {
    let quality = u32::from(quality.min(100));
    let level = 9 - (quality * 9 + 50) / 100;

    match level {
        0..=3 => Compression::Fast,
        4..=6 => Compression::Default,
        _ => Compression::Best
    }
}

/// Encode a buffer as an 8 bit RGBA png
///
/// # Errors
/// Encoder errors
pub fn encode_png(buffer: &RasterBuffer, quality: u8) -> Result<Vec<u8>, RasterErrors> {
    let (width, height) = buffer.dimensions();
    let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(RasterErrors::InvalidParameter("Image too large for png".into()))
    };

    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, width, height);

        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(compression_for_quality(quality));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(buffer.as_bytes())?;
        writer.finish()?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use ::png::Compression;

    use crate::buffer::{RasterBuffer, Rgba};
    use crate::codecs::png::{compression_for_quality, decode_png, encode_png};

    #[test]
    fn test_png_is_lossless() {
        let buffer = RasterBuffer::from_fn(13, 7, |x, y| {
            Rgba::new((x * 19) as u8, (y * 31) as u8, (x ^ y) as u8, (x * y) as u8)
        })
        .unwrap();

        let decoded = decode_png(&encode_png(&buffer, 50).unwrap()).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[test]
    fn test_quality_mapping() {
        assert!(matches!(compression_for_quality(100), Compression::Fast));
        assert!(matches!(compression_for_quality(50), Compression::Default));
        assert!(matches!(compression_for_quality(0), Compression::Best));
    }
}
