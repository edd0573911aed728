/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raster buffers and pixel transforms
//!
//! This crate provides the in-memory image representation used by the rest of the
//! `zune-cv` crates together with decoding, encoding and a set of classic
//! pixel level transforms.
//!
//! - Buffers are always interleaved RGBA8, see [`buffer::RasterBuffer`]
//! - Images are decoded via [`codecs::decode`] which sniffs the format from header bytes
//! - Transforms implement [`traits::OperationsTrait`]
//!
//! # Example
//! - Blur an image and find its edges
//! ```no_run
//! use zune_raster::canny::Canny;
//! use zune_raster::codecs::{decode, encode};
//! use zune_raster::gaussian_blur::GaussianBlur;
//! use zune_raster::traits::OperationsTrait;
//!
//! let mut image = decode("input.png").unwrap();
//! GaussianBlur::new(1.5).execute(&mut image).unwrap();
//! Canny::new(50.0, 150.0).execute(&mut image).unwrap();
//! encode(&image, "edges.png", 90).unwrap();
//! ```
//!
//! # Features
//! - `log`: Route the crate's log messages to the `log` facade
//! - `threads`: Run convolution rows on multiple threads
//! - `serde-support`: Derive `Serialize` on public result types
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

pub mod buffer;
pub mod cancel;
pub mod canny;
pub mod codecs;
pub mod colorspace;
pub mod convolve;
pub mod crop;
pub mod equalize;
pub mod errors;
pub mod gaussian_blur;
pub mod grayscale;
pub mod resize;
pub mod sobel;
pub mod threshold;
pub mod traits;

pub use zune_core;
