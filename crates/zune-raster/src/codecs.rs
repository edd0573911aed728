/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for all supported codecs
//!
//! Decoding sniffs the format from the first bytes of the input,
//! the file extension is never consulted.
//! Encoding picks the format from the output file extension.
//!
//! Every decoded image is expanded to interleaved RGBA8 regardless of the
//! colorspace it was stored in, formats without alpha get an opaque alpha channel.
//!
//! | Format | Decode               | Encode                 |
//! |--------|----------------------|------------------------|
//! | JPEG   | `zune-jpeg`          | `jpeg-encoder`         |
//! | PNG    | `png`                | `png`                  |
//! | GIF    | `gif`, first frame   | `gif`, single frame    |
use std::path::Path;

use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_core::log::{debug, trace};
use zune_core::options::EncoderOptions;

use crate::buffer::RasterBuffer;
use crate::errors::RasterErrors;

pub mod gif;
pub mod jpeg;
pub mod png;

/// All supported image formats
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ImageFormat {
    /// Joint Photographic Experts Group
    JPEG,
    /// Portable Network Graphics
    PNG,
    /// Graphics Interchange Format
    GIF,
    /// Any unknown format
    Unknown
}

impl ImageFormat {
    /// Guess the format of an image from its header bytes
    ///
    /// Returns [`ImageFormat::Unknown`] if no magic number matches
    #[must_use]
    pub fn guess_format(bytes: &[u8]) -> ImageFormat {
        let magic_bytes: [(&[u8], ImageFormat); 4] = [
            (&[137, 80, 78, 71, 13, 10, 26, 10], ImageFormat::PNG),
            // some jpeg files lack the third 0xff byte, so only match SOI
            (&[0xff, 0xd8], ImageFormat::JPEG),
            (b"GIF87a", ImageFormat::GIF),
            (b"GIF89a", ImageFormat::GIF)
        ];

        for (magic, format) in magic_bytes {
            if bytes.starts_with(magic) {
                return format;
            }
        }
        ImageFormat::Unknown
    }

    /// Map a file extension (without the leading dot) to the format we encode it as
    ///
    /// Case insensitive, returns `None` for extensions we cannot write
    pub fn encoder_for_extension<P: AsRef<str>>(extension: P) -> Option<ImageFormat> {
        match extension.as_ref().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(ImageFormat::JPEG),
            "png" => Some(ImageFormat::PNG),
            "gif" => Some(ImageFormat::GIF),
            _ => None
        }
    }

    /// Return true if the format can be decoded
    #[must_use]
    pub const fn has_decoder(self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }

    /// Return true if the format can be encoded
    #[must_use]
    pub const fn has_encoder(self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}

/// Decode an image from a file path
///
/// # Errors
/// - [`RasterErrors::FileNotFound`]: The path does not exist
/// - Any error [`decode_bytes`] may return
pub fn decode<P: AsRef<Path>>(path: P) -> Result<RasterBuffer, RasterErrors> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RasterErrors::FileNotFound(path.to_path_buf()));
    }
    trace!("Reading {:?}", path);

    let bytes = std::fs::read(path)?;

    decode_bytes(&bytes)
}

/// Decode an image already in memory
///
/// # Errors
/// - [`RasterErrors::UnsupportedFormat`]: The header matches no known format
/// - The codec error if the image is corrupt
pub fn decode_bytes(bytes: &[u8]) -> Result<RasterBuffer, RasterErrors> {
    let format = ImageFormat::guess_format(bytes);

    debug!("Detected image format {:?}", format);

    let buffer = match format {
        ImageFormat::JPEG => jpeg::decode_jpeg(bytes)?,
        ImageFormat::PNG => png::decode_png(bytes)?,
        ImageFormat::GIF => gif::decode_gif(bytes)?,
        ImageFormat::Unknown => {
            let header: Vec<u8> = bytes.iter().take(8).copied().collect();

            return Err(RasterErrors::UnsupportedFormat(format!(
                "Unknown header bytes {header:?}"
            )));
        }
    };
    debug!(
        "Decoded {:?} image of {}x{}",
        format,
        buffer.width(),
        buffer.height()
    );
    Ok(buffer)
}

/// Encode `buffer` to a file, the format is chosen from the file extension
///
/// # Arguments
/// - buffer: The image to write
/// - path: Output path, its extension selects the format
/// - quality: Quality in `0..=100`, interpreted per format
///
/// # Errors
/// - [`RasterErrors::FormatError`]: The extension is missing or not supported
/// - Encoder and io errors
pub fn encode<P: AsRef<Path>>(
    buffer: &RasterBuffer, path: P, quality: u8
) -> Result<(), RasterErrors> {
    let path = path.as_ref();

    let extension = path
        .extension()
        .and_then(|x| x.to_str())
        .ok_or_else(|| RasterErrors::FormatError(format!("No file extension in {path:?}")))?;

    let format = ImageFormat::encoder_for_extension(extension).ok_or_else(|| {
        RasterErrors::FormatError(format!("No encoder for extension {extension:?}"))
    })?;

    let options = encoder_options(buffer, quality);
    let data = encode_bytes(buffer, format, &options)?;

    debug!("Writing {} bytes to {:?}", data.len(), path);
    std::fs::write(path, data)?;

    Ok(())
}

/// Encode `buffer` in memory
///
/// Only the quality of `options` is consulted, dimensions come from the buffer.
///
/// # Errors
/// - [`RasterErrors::FormatError`]: `format` is [`ImageFormat::Unknown`]
/// - Encoder errors
pub fn encode_bytes(
    buffer: &RasterBuffer, format: ImageFormat, options: &EncoderOptions
) -> Result<Vec<u8>, RasterErrors> {
    let quality = options.quality().min(100);

    trace!("Encoding to {:?} with quality {}", format, quality);

    match format {
        ImageFormat::JPEG => jpeg::encode_jpeg(buffer, quality),
        ImageFormat::PNG => png::encode_png(buffer, quality),
        ImageFormat::GIF => gif::encode_gif(buffer, quality),
        ImageFormat::Unknown => Err(RasterErrors::FormatError(
            "Cannot encode to an unknown format".to_string()
        ))
    }
}

/// Create encoder options describing `buffer`
#[must_use]
pub fn encoder_options(buffer: &RasterBuffer, quality: u8) -> EncoderOptions {
    EncoderOptions::new(
        buffer.width(),
        buffer.height(),
        ColorSpace::RGBA,
        BitDepth::Eight
    )
    .set_quality(quality.min(100))
}

/// Expand interleaved 8 bit samples in `colorspace` to RGBA
///
/// # Errors
/// [`RasterErrors::UnsupportedFormat`] for colorspaces other than Luma, LumaA, RGB and RGBA
pub(crate) fn expand_to_rgba(
    data: &[u8], colorspace: ColorSpace, width: usize, height: usize
) -> Result<RasterBuffer, RasterErrors> {
    let components = colorspace.num_components();
    let expected = width * height * components;

    if data.len() < expected {
        return Err(RasterErrors::DimensionMismatch(format!(
            "Decoder produced {} bytes, expected {expected}",
            data.len()
        )));
    }
    let data = &data[..expected];

    let pixels = match colorspace {
        ColorSpace::RGBA => data.to_vec(),
        ColorSpace::RGB => data
            .chunks_exact(3)
            .flat_map(|x| [x[0], x[1], x[2], 255])
            .collect(),
        ColorSpace::Luma => data.iter().flat_map(|x| [*x, *x, *x, 255]).collect(),
        ColorSpace::LumaA => data
            .chunks_exact(2)
            .flat_map(|x| [x[0], x[0], x[0], x[1]])
            .collect(),
        other => {
            return Err(RasterErrors::UnsupportedFormat(format!(
                "Cannot convert colorspace {other:?} to RGBA"
            )))
        }
    };
    RasterBuffer::from_rgba(pixels, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_format() {
        assert_eq!(
            ImageFormat::guess_format(&[0xff, 0xd8, 0xff, 0xe0]),
            ImageFormat::JPEG
        );
        assert_eq!(ImageFormat::guess_format(b"GIF89a...."), ImageFormat::GIF);
        assert_eq!(
            ImageFormat::guess_format(&[137, 80, 78, 71, 13, 10, 26, 10, 0]),
            ImageFormat::PNG
        );
        assert_eq!(ImageFormat::guess_format(b"BM"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::guess_format(&[]), ImageFormat::Unknown);
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(
            ImageFormat::encoder_for_extension("JPG"),
            Some(ImageFormat::JPEG)
        );
        assert_eq!(ImageFormat::encoder_for_extension("webp"), None);
    }

    #[test]
    fn test_unknown_bytes_rejected() {
        assert!(matches!(
            decode_bytes(b"this is not an image"),
            Err(RasterErrors::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            decode("/definitely/not/a/real/file.png"),
            Err(RasterErrors::FileNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_extension() {
        let buffer = RasterBuffer::new(2, 2).unwrap();
        let path = std::env::temp_dir().join("zune-raster-unknown.tiff");

        assert!(matches!(
            encode(&buffer, path, 80),
            Err(RasterErrors::FormatError(_))
        ));
    }

    #[test]
    fn test_expand_gray_alpha() {
        let buffer = expand_to_rgba(&[10, 20, 30, 40], ColorSpace::LumaA, 2, 1).unwrap();
        assert_eq!(buffer.as_bytes(), &[10, 10, 10, 20, 30, 30, 30, 40]);
    }
}
