/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during decoding, encoding and processing of raster buffers
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

/// All errors that can be returned by `zune-raster` and
/// the crates built on top of it.
pub enum RasterErrors {
    /// The file we were asked to open does not exist
    FileNotFound(PathBuf),
    /// Any other io error while reading or writing files
    IoErrors(std::io::Error),
    /// The header bytes do not belong to any format we can decode
    UnsupportedFormat(String),
    /// We cannot write to the requested output format
    FormatError(String),
    /// Errors from the jpeg decoder
    JpegDecodeErrors(zune_jpeg::errors::DecodeErrors),
    /// Errors from the png decoder
    PngDecodeErrors(png::DecodingError),
    /// Errors from the gif decoder
    GifDecodeErrors(gif::DecodingError),
    /// An encoder failed to write the image
    EncodeErrors(String),
    /// Two inputs have incompatible dimensions or shapes
    DimensionMismatch(String),
    /// A parameter is outside of its allowed range
    InvalidParameter(String),
    /// A pixel access outside of the buffer
    OutOfBounds {
        x:      usize,
        y:      usize,
        width:  usize,
        height: usize
    },
    /// Two perceptual hashes have different bit lengths
    HashLengthMismatch(usize, usize),
    /// A cancel token was triggered while the named operation ran
    Cancelled(&'static str),
    /// A generic static error
    GenericStr(&'static str)
}

impl Debug for RasterErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound(path) => {
                writeln!(f, "File {path:?} not found")
            }
            Self::IoErrors(err) => {
                writeln!(f, "Io error: {err:?}")
            }
            Self::UnsupportedFormat(reason) => {
                writeln!(f, "Unsupported image format: {reason}")
            }
            Self::FormatError(reason) => {
                writeln!(f, "Cannot encode to format: {reason}")
            }
            Self::JpegDecodeErrors(err) => {
                writeln!(f, "Jpeg decoding failed: {err:?}")
            }
            Self::PngDecodeErrors(err) => {
                writeln!(f, "Png decoding failed: {err:?}")
            }
            Self::GifDecodeErrors(err) => {
                writeln!(f, "Gif decoding failed: {err:?}")
            }
            Self::EncodeErrors(reason) => {
                writeln!(f, "Encoding failed: {reason}")
            }
            Self::DimensionMismatch(reason) => {
                writeln!(f, "Dimension mismatch: {reason}")
            }
            Self::InvalidParameter(reason) => {
                writeln!(f, "Invalid parameter: {reason}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height
            } => {
                writeln!(
                    f,
                    "Pixel ({x},{y}) is out of bounds for an image of {width}x{height}"
                )
            }
            Self::HashLengthMismatch(expected, found) => {
                writeln!(
                    f,
                    "Cannot compare hashes of length {expected} and {found}"
                )
            }
            Self::Cancelled(operation) => {
                writeln!(f, "Operation {operation} was cancelled")
            }
            Self::GenericStr(reason) => {
                writeln!(f, "{reason}")
            }
        }
    }
}

impl Display for RasterErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for RasterErrors {}

impl From<std::io::Error> for RasterErrors {
    fn from(value: std::io::Error) -> Self {
        Self::IoErrors(value)
    }
}

impl From<zune_jpeg::errors::DecodeErrors> for RasterErrors {
    fn from(value: zune_jpeg::errors::DecodeErrors) -> Self {
        Self::JpegDecodeErrors(value)
    }
}

impl From<png::DecodingError> for RasterErrors {
    fn from(value: png::DecodingError) -> Self {
        Self::PngDecodeErrors(value)
    }
}

impl From<gif::DecodingError> for RasterErrors {
    fn from(value: gif::DecodingError) -> Self {
        Self::GifDecodeErrors(value)
    }
}

impl From<png::EncodingError> for RasterErrors {
    fn from(value: png::EncodingError) -> Self {
        Self::EncodeErrors(format!("png: {value}"))
    }
}

impl From<gif::EncodingError> for RasterErrors {
    fn from(value: gif::EncodingError) -> Self {
        Self::EncodeErrors(format!("gif: {value}"))
    }
}

impl From<jpeg_encoder::EncodingError> for RasterErrors {
    fn from(value: jpeg_encoder::EncodingError) -> Self {
        Self::EncodeErrors(format!("jpeg: {value}"))
    }
}

impl From<&'static str> for RasterErrors {
    fn from(value: &'static str) -> Self {
        Self::GenericStr(value)
    }
}
