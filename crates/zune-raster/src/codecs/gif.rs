/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! GIF support via the `gif` crate
//!
//! Only the first frame is decoded and a single frame is written.
use ::gif::{ColorOutput, DecodeOptions, Encoder, Frame};
use zune_core::log::{trace, warn};

use crate::buffer::{RasterBuffer, CHANNELS};
use crate::codecs::jpeg::dimensions_u16;
use crate::errors::RasterErrors;

/// Decode the first frame of a gif to RGBA
///
/// The frame is placed on a transparent canvas of the logical screen size
///
/// # Errors
/// Decoder errors, or a gif without any frame
pub fn decode_gif(bytes: &[u8]) -> Result<RasterBuffer, RasterErrors> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::RGBA);

    let mut decoder = options.read_info(bytes)?;

    let width = usize::from(decoder.width());
    let height = usize::from(decoder.height());

    let frame = decoder
        .read_next_frame()?
        .ok_or(RasterErrors::GenericStr("Gif contains no frames"))?;

    let (left, top) = (usize::from(frame.left), usize::from(frame.top));
    let (frame_w, frame_h) = (usize::from(frame.width), usize::from(frame.height));

    trace!(
        "Gif screen {}x{}, first frame {}x{} at ({},{})",
        width,
        height,
        frame_w,
        frame_h,
        left,
        top
    );
    if left == 0 && top == 0 && frame_w == width && frame_h == height {
        return RasterBuffer::from_rgba(frame.buffer.to_vec(), width, height);
    }
    if left + frame_w > width || top + frame_h > height {
        warn!("Gif frame extends past the logical screen, clipping it");
    }
    let mut canvas = RasterBuffer::new(width, height)?;
    let stride = width * CHANNELS;
    let copy_w = frame_w.min(width.saturating_sub(left));

    if copy_w == 0 {
        return Ok(canvas);
    }
    let canvas_bytes = canvas.as_bytes_mut();

    for (y, row) in frame
        .buffer
        .chunks_exact(frame_w * CHANNELS)
        .enumerate()
        .take(height.saturating_sub(top))
    {
        let start = (top + y) * stride + left * CHANNELS;

        canvas_bytes[start..start + copy_w * CHANNELS].copy_from_slice(&row[..copy_w * CHANNELS]);
    }
    Ok(canvas)
}

/// Map a `0..=100` quality to the NeuQuant sampling speed
///
/// Higher quality samples more pixels, quality 100 gives speed 1 and 0 gives 30
#[must_use]
pub fn speed_for_quality(quality: u8) -> i32 {
    let quality = i32::from(quality.min(100));
    1 + (100 - quality) * 29 / 100
}

/// Encode a buffer as a single frame gif
///
/// Colors are quantized to a 256 entry palette
///
/// # Errors
/// - [`RasterErrors::InvalidParameter`] if a dimension does not fit in 16 bits
/// - Encoder errors
pub fn encode_gif(buffer: &RasterBuffer, quality: u8) -> Result<Vec<u8>, RasterErrors> {
    let (width, height) = dimensions_u16(buffer, "gif")?;

    let mut pixels = buffer.as_bytes().to_vec();
    let frame = Frame::from_rgba_speed(width, height, &mut pixels, speed_for_quality(quality));

    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, width, height, &[])?;
        encoder.write_frame(&frame)?;
    }
    Ok(out)
}
