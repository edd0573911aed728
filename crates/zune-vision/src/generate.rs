/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Procedural image generation
//!
//! Generators that need randomness take a [`WyRand`](nanorand::WyRand) from the
//! caller, so the same seed always produces the same image.
//!
//! # Example
//! ```
//! use nanorand::WyRand;
//! use zune_vision::generate::{perlin_noise, NoiseOptions};
//!
//! let options = NoiseOptions::default().set_octaves(3);
//!
//! let a = perlin_noise(32, 32, &options, &mut WyRand::new_seed(42)).unwrap();
//! let b = perlin_noise(32, 32, &options, &mut WyRand::new_seed(42)).unwrap();
//!
//! assert_eq!(a, b);
//! ```
pub use crate::generate::blend::{blend, BlendMode};
pub use crate::generate::fractal::{julia, mandelbrot, FractalOptions, DEFAULT_JULIA_CONSTANT};
pub use crate::generate::gradient::{linear_gradient, radial_gradient};
pub use crate::generate::noise::{perlin_noise, simplex_noise, white_noise, NoiseOptions};
pub use crate::generate::pattern::{checkerboard, sine_pattern};
pub use crate::generate::voronoi::voronoi;

pub mod blend;
pub mod fractal;
pub mod gradient;
pub mod noise;
pub mod pattern;
pub mod voronoi;
