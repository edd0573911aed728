/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! End to end checks across modules
use nanorand::WyRand;
use zune_raster::buffer::{RasterBuffer, Rgba};
use zune_raster::crop::crop;
use zune_raster::traits::OperationsTrait;
use zune_vision::compare::{
    average_hash, difference_hash, mse, perceptual_hash, psnr, ssim, DEFAULT_HASH_SIZE
};
use zune_vision::detect::{
    detect_blobs, find_contours, segment_by_color, template_match, BoundingBox, Opening,
    TemplateMatchOptions
};
use zune_vision::features::{color_histogram, extract_features, feature_vector, FeatureOptions};
use zune_vision::generate::{
    mandelbrot, perlin_noise, simplex_noise, voronoi, white_noise, FractalOptions, NoiseOptions
};

fn two_squares() -> RasterBuffer {
    RasterBuffer::from_fn(50, 40, |x, y| {
        let first = (5..15).contains(&x) && (5..15).contains(&y);
        let second = (30..40).contains(&x) && (20..30).contains(&y);

        if first || second {
            Rgba::WHITE
        } else {
            Rgba::BLACK
        }
    })
    .unwrap()
}

#[test]
fn two_squares_are_two_blobs() {
    let blobs = detect_blobs(&two_squares(), 100);

    assert_eq!(blobs.len(), 2);
    assert_eq!(blobs[0].area, 100);
    assert_eq!(blobs[1].area, 100);
    assert_eq!(blobs[0].bounding_box, BoundingBox::new(5, 5, 10, 10));
    assert_eq!(blobs[1].bounding_box, BoundingBox::new(30, 20, 10, 10));
    assert_eq!(blobs[0].centroid, (9.5, 9.5));
    assert_eq!(blobs[0].perimeter, 40);

    let contours = find_contours(&two_squares(), 100);
    assert_eq!(contours.len(), 2);
    assert_eq!(contours[1].points[0], (30, 20));
}

#[test]
fn segmentation_feeds_blob_detection() {
    let image = RasterBuffer::from_fn(60, 60, |x, y| {
        if (10..30).contains(&x) && (10..30).contains(&y) {
            Rgba::rgb(20, 200, 30)
        } else {
            Rgba::rgb(200, 200, 200)
        }
    })
    .unwrap();

    let mut mask = segment_by_color(&image, Rgba::rgb(0, 255, 0), 80.0);
    Opening::new(3).execute(&mut mask).unwrap();

    let blobs = detect_blobs(&mask, 100);
    assert_eq!(blobs.len(), 1);
    assert_eq!(blobs[0].area, 400);
}

#[test]
fn exact_crop_matches_once() {
    let source = white_noise(80, 60, false, &mut WyRand::new_seed(11)).unwrap();
    let template = crop(&source, 33, 21, 12, 12).unwrap();

    let matches = template_match(&source, &template, &TemplateMatchOptions::default()).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].bounding_box, BoundingBox::new(33, 21, 12, 12));
    assert!((matches[0].confidence - 1.0).abs() < 1e-6);
}

#[test]
fn identical_images_compare_perfectly() {
    let image = perlin_noise(64, 64, &NoiseOptions::default(), &mut WyRand::new_seed(2)).unwrap();

    assert_eq!(mse(&image, &image).unwrap(), 0.0);
    assert_eq!(psnr(&image, &image).unwrap(), f64::INFINITY);
    assert!((ssim(&image, &image, 11).unwrap() - 1.0).abs() < 1e-9);

    for hash in [
        average_hash(&image, DEFAULT_HASH_SIZE).unwrap(),
        difference_hash(&image, DEFAULT_HASH_SIZE).unwrap(),
        perceptual_hash(&image, DEFAULT_HASH_SIZE).unwrap()
    ] {
        assert_eq!(hash.to_string().len(), 64);
        assert_eq!(hash.hamming_distance(&hash).unwrap(), 0);
        assert_eq!(hash.similarity(&hash).unwrap(), 1.0);
    }
}

#[test]
fn mandelbrot_center_is_black() {
    let options = FractalOptions::default().set_max_iterations(100);
    let image = mandelbrot(101, 81, &options).unwrap();

    assert_eq!(image.get_pixel(50, 40).unwrap(), Rgba::BLACK);
}

#[test]
fn generators_are_reproducible() {
    let options = NoiseOptions::default();

    assert_eq!(
        simplex_noise(30, 20, &options, &mut WyRand::new_seed(5)).unwrap(),
        simplex_noise(30, 20, &options, &mut WyRand::new_seed(5)).unwrap()
    );
    assert_eq!(
        voronoi(30, 20, 6, &mut WyRand::new_seed(5)).unwrap(),
        voronoi(30, 20, 6, &mut WyRand::new_seed(5)).unwrap()
    );
}

#[test]
fn color_histograms_are_normalized() {
    let image = white_noise(33, 17, true, &mut WyRand::new_seed(6)).unwrap();
    let histogram = color_histogram(&image, 16).unwrap();

    for channel in &histogram.channels {
        let sum: f64 = channel.bins.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "channel {} sums to {sum}", channel.name);
    }
}

#[test]
fn feature_vectors_have_fixed_layout() {
    let options = FeatureOptions::default().set_keypoints(None);

    let a = white_noise(40, 40, true, &mut WyRand::new_seed(1)).unwrap();
    let b = RasterBuffer::fill(Rgba::gray(10), 25, 70).unwrap();

    let va = feature_vector(&extract_features(&a, &options).unwrap());
    let vb = feature_vector(&extract_features(&b, &options).unwrap());

    assert_eq!(va.len(), vb.len());
    assert!(va.iter().chain(&vb).all(|x| x.is_finite()));
}
