/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use nanorand::{Rng, WyRand};
use png::Transformations;
use zune_raster::buffer::{RasterBuffer, Rgba};
use zune_raster::codecs::{decode, decode_bytes, encode, encode_bytes, encoder_options, ImageFormat};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("zune-raster-{}-{name}", std::process::id()))
}

fn random_buffer(seed: u64, width: usize, height: usize) -> RasterBuffer {
    let mut rng = WyRand::new_seed(seed);
    let mut pixels = vec![0_u8; width * height * 4];
    rng.fill(&mut pixels);

    RasterBuffer::from_rgba(pixels, width, height).unwrap()
}

fn decode_ref(data: &[u8]) -> (Vec<u8>, u32, u32) {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(Transformations::EXPAND);

    let mut reader = decoder.read_info().unwrap();

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();

    assert_eq!(info.color_type, png::ColorType::Rgba);
    buf.truncate(info.buffer_size());

    (buf, info.width, info.height)
}

#[test]
fn test_png_matches_reference_decoder() {
    let buffer = random_buffer(0xdead, 63, 41);
    let path = temp_path("reference.png");

    encode(&buffer, &path, 75).unwrap();

    let contents = std::fs::read(&path).unwrap();
    let (ref_pixels, width, height) = decode_ref(&contents);

    assert_eq!((width, height), (63, 41));
    assert_eq!(ref_pixels, buffer.as_bytes());

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_png_file_roundtrip_is_lossless() {
    let original = random_buffer(7, 32, 17);
    let path = temp_path("lossless.png");

    encode(&original, &path, 100).unwrap();
    let first = decode(&path).unwrap();

    encode(&first, &path, 0).unwrap();
    let second = decode(&path).unwrap();

    assert_eq!(first, original);
    assert_eq!(second, original);

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_lossy_roundtrips_keep_dimensions() {
    let buffer = RasterBuffer::from_fn(45, 30, |x, y| {
        Rgba::rgb((x * 5) as u8, (y * 8) as u8, ((x + y) * 3) as u8)
    })
    .unwrap();

    for extension in ["jpg", "jpeg", "gif"] {
        let path = temp_path(&format!("lossy.{extension}"));

        encode(&buffer, &path, 80).unwrap();
        let first = decode(&path).unwrap();
        encode(&first, &path, 80).unwrap();
        let second = decode(&path).unwrap();

        assert_eq!(first.dimensions(), (45, 30), "{extension}");
        assert_eq!(second.dimensions(), (45, 30), "{extension}");

        std::fs::remove_file(path).unwrap();
    }
}

#[test]
fn test_format_is_sniffed_not_guessed_from_extension() {
    let buffer = random_buffer(3, 8, 8);
    let options = encoder_options(&buffer, 90);

    let png_bytes = encode_bytes(&buffer, ImageFormat::PNG, &options).unwrap();
    // png data behind a jpeg extension still decodes as png
    let path = temp_path("actually-png.jpg");
    std::fs::write(&path, &png_bytes).unwrap();

    assert_eq!(decode(&path).unwrap(), buffer);
    assert_eq!(decode_bytes(&png_bytes).unwrap(), buffer);

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_grayscale_png_is_expanded() {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, 3, 1);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0, 128, 255]).unwrap();
    }
    let buffer = decode_bytes(&data).unwrap();

    assert_eq!(buffer.dimensions(), (3, 1));
    assert_eq!(buffer.get_pixel(1, 0).unwrap(), Rgba::gray(128));
    assert_eq!(buffer.get_pixel(2, 0).unwrap(), Rgba::new(255, 255, 255, 255));
}
