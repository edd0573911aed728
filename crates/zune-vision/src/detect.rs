/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Locating objects and regions
//!
//! - [`template_match`]: find a known patch inside a larger image
//! - [`segment_by_color`] and [`segment_by_hsv`]: turn an image into a binary mask
//! - [`detect_blobs`] and [`find_contours`]: describe the connected regions of a mask
//! - [`Erode`], [`Dilate`], [`Opening`] and [`Closing`]: clean a mask up before analysis
//!
//! # Example
//! ```
//! use zune_raster::buffer::{RasterBuffer, Rgba};
//! use zune_vision::detect::{detect_blobs, segment_by_color};
//!
//! let image = RasterBuffer::from_fn(40, 40, |x, y| {
//!     if x > 10 && x < 30 && y > 10 && y < 30 {
//!         Rgba::rgb(250, 10, 10)
//!     } else {
//!         Rgba::rgb(10, 10, 250)
//!     }
//! })
//! .unwrap();
//!
//! let mask = segment_by_color(&image, Rgba::rgb(255, 0, 0), 20.0);
//! let blobs = detect_blobs(&mask, 100);
//!
//! assert_eq!(blobs.len(), 1);
//! assert_eq!(blobs[0].area, 19 * 19);
//! ```
pub use crate::detect::blobs::{detect_blobs, Blob, DEFAULT_MIN_AREA};
pub use crate::detect::contours::{find_contours, Contour, MAX_TRACE_STEPS};
pub use crate::detect::morphology::{Closing, Dilate, Erode, Opening};
pub use crate::detect::nms::{non_maximum_suppression, BoundingBox, Match};
pub use crate::detect::segment::{segment_by_color, segment_by_hsv, HsvRange};
pub use crate::detect::template::{template_match, TemplateMatchOptions};
pub use crate::detect::union_find::UnionFind;

pub mod blobs;
pub mod contours;
pub mod morphology;
pub mod nms;
pub mod segment;
pub mod template;
pub mod union_find;
