/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Computer vision on top of `zune-raster`
//!
//! The crate is split by what you want to do with an image
//!
//! - [`features`]: describe it with histograms, texture, moments and keypoints
//! - [`compare`]: measure how similar two images are
//! - [`detect`]: find templates, colored regions, blobs and their contours
//! - [`generate`]: create images from noise, gradients, patterns and fractals
//!
//! Everything operates on [`RasterBuffer`](zune_raster::buffer::RasterBuffer),
//! which is re-exported together with the rest of `zune-raster`.
//!
//! # Example
//! - Compare an image with a blurred copy of itself
//! ```
//! use zune_vision::compare::compare_images;
//! use zune_vision::generate::checkerboard;
//! use zune_vision::zune_raster::buffer::Rgba;
//! use zune_vision::zune_raster::gaussian_blur::GaussianBlur;
//! use zune_vision::zune_raster::traits::OperationsTrait;
//!
//! let image = checkerboard(64, 64, 8, Rgba::WHITE, Rgba::BLACK).unwrap();
//! let blurred = GaussianBlur::new(2.0).clone_and_execute(&image).unwrap();
//!
//! let report = compare_images(&image, &blurred).unwrap();
//! assert!(report.ssim < 1.0);
//! assert!(report.psnr.is_finite());
//! ```
//!
//! # Features
//! - `log`: Route log messages to the `log` facade
//! - `threads`: Multithreaded convolution and template matching
//! - `serde-support`: Derive `Serialize` on reports and descriptors
#![cfg_attr(feature = "benchmarks", feature(test))]
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::many_single_char_names
)]

pub use zune_raster;

pub mod compare;
pub mod detect;
pub mod features;
pub mod generate;
