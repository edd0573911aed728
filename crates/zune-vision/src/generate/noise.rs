/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Random and coherent noise
//!
//! Perlin and simplex fields are summed over several octaves, then stretched
//! so the smallest value of the field maps to 0 and the largest to 255.
use nanorand::{Rng, WyRand};
use zune_core::log::trace;
use zune_raster::buffer::{clamp_u8, RasterBuffer, Rgba};
use zune_raster::errors::RasterErrors;

/// Gradient directions shared by both noise functions
const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0)
];

/// Skew factor for 2D simplex noise, `(√3 - 1) / 2`
const F2: f64 = 0.366_025_403_784_438_6;
/// Unskew factor for 2D simplex noise, `(3 - √3) / 6`
const G2: f64 = 0.211_324_865_405_187_1;

/// Parameters for fractal noise
#[derive(Copy, Clone, Debug)]
pub struct NoiseOptions {
    scale:       f64,
    octaves:     usize,
    persistence: f64
}

impl Default for NoiseOptions {
    fn default() -> Self {
        NoiseOptions {
            scale:       0.05,
            octaves:     4,
            persistence: 0.5
        }
    }
}

impl NoiseOptions {
    /// Frequency of the first octave, in cycles per pixel
    #[must_use]
    pub fn set_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
    /// Number of layers summed, each at twice the frequency of the previous
    #[must_use]
    pub fn set_octaves(mut self, octaves: usize) -> Self {
        self.octaves = octaves;
        self
    }
    /// Amplitude multiplier between octaves
    #[must_use]
    pub fn set_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    fn validate(&self) -> Result<(), RasterErrors> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(RasterErrors::InvalidParameter(format!(
                "Noise scale must be positive, got {}",
                self.scale
            )));
        }
        if self.octaves == 0 {
            return Err(RasterErrors::InvalidParameter(
                "Noise needs at least one octave".to_string()
            ));
        }
        Ok(())
    }
}

/// Uniform random noise
///
/// Gray noise uses one random value per pixel, color noise one per channel.
/// Alpha is always opaque.
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if a dimension is zero
pub fn white_noise(
    width: usize, height: usize, color: bool, rng: &mut WyRand
) -> Result<RasterBuffer, RasterErrors> {
    RasterBuffer::from_fn(width, height, |_, _| {
        if color {
            Rgba::rgb(rng.generate(), rng.generate(), rng.generate())
        } else {
            Rgba::gray(rng.generate())
        }
    })
}

/// Shuffled `0..256` repeated twice so lookups never wrap
fn permutation(rng: &mut WyRand) -> Vec<usize> {
    let mut table: Vec<usize> = (0..256).collect();
    rng.shuffle(&mut table);
    table.extend_from_within(..);
    table
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

fn gradient(hash: usize, x: f64, y: f64) -> f64 {
    let (gx, gy) = GRADIENTS[hash & 7];
    gx * x + gy * y
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lattice(value: f64) -> usize {
    (value.floor() as i64 & 255) as usize
}

fn perlin(perm: &[usize], x: f64, y: f64) -> f64 {
    let xi = lattice(x);
    let yi = lattice(y);
    let xf = x - x.floor();
    let yf = y - y.floor();

    let u = fade(xf);
    let v = fade(yf);

    let aa = perm[perm[xi] + yi];
    let ab = perm[perm[xi] + yi + 1];
    let ba = perm[perm[xi + 1] + yi];
    let bb = perm[perm[xi + 1] + yi + 1];

    let x1 = lerp(gradient(aa, xf, yf), gradient(ba, xf - 1.0, yf), u);
    let x2 = lerp(gradient(ab, xf, yf - 1.0), gradient(bb, xf - 1.0, yf - 1.0), u);

    lerp(x1, x2, v)
}

fn simplex(perm: &[usize], x: f64, y: f64) -> f64 {
    let skew = (x + y) * F2;
    let i = (x + skew).floor();
    let j = (y + skew).floor();

    let unskew = (i + j) * G2;
    let x0 = x - (i - unskew);
    let y0 = y - (j - unskew);

    // which of the two triangles of the cell we are in
    let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - i1 as f64 + G2;
    let y1 = y0 - j1 as f64 + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let ii = lattice(i);
    let jj = lattice(j);

    let corners = [
        (x0, y0, perm[ii + perm[jj]]),
        (x1, y1, perm[ii + i1 + perm[jj + j1]]),
        (x2, y2, perm[ii + 1 + perm[jj + 1]])
    ];

    let total: f64 = corners
        .iter()
        .map(|&(cx, cy, hash)| {
            let t = 0.5 - cx * cx - cy * cy;
            if t < 0.0 {
                0.0
            } else {
                let t2 = t * t;
                t2 * t2 * gradient(hash, cx, cy)
            }
        })
        .sum();

    70.0 * total
}

/// Sum octaves of `noise` at every pixel and stretch the result to `[0, 255]`
fn fractal_field<F: Fn(&[usize], f64, f64) -> f64>(
    width: usize, height: usize, options: &NoiseOptions, rng: &mut WyRand, noise: F
) -> Result<RasterBuffer, RasterErrors> {
    options.validate()?;

    if width == 0 || height == 0 {
        return Err(RasterErrors::InvalidParameter(format!(
            "Cannot generate a {width}x{height} image"
        )));
    }
    let perm = permutation(rng);
    let mut field = vec![0.0_f64; width * height];

    for (i, value) in field.iter_mut().enumerate() {
        let x = (i % width) as f64;
        let y = (i / width) as f64;

        let mut frequency = options.scale;
        let mut amplitude = 1.0;

        for _ in 0..options.octaves {
            *value += amplitude * noise(&perm, x * frequency, y * frequency);
            frequency *= 2.0;
            amplitude *= options.persistence;
        }
    }
    let min = field.iter().copied().fold(f64::INFINITY, f64::min);
    let max = field.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        trace!("Flat noise field, output is black");
    }

    let pixels = field
        .iter()
        .map(|v| {
            let level = if range == 0.0 {
                0
            } else {
                clamp_u8(((v - min) / range * 255.0) as f32)
            };
            Rgba::gray(level).to_array()
        })
        .collect::<Vec<[u8; 4]>>();

    RasterBuffer::from_rgba(pixels.concat(), width, height)
}

/// Fractal Perlin noise
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] on a zero dimension, zero octaves or a non positive scale
pub fn perlin_noise(
    width: usize, height: usize, options: &NoiseOptions, rng: &mut WyRand
) -> Result<RasterBuffer, RasterErrors> {
    fractal_field(width, height, options, rng, perlin)
}

/// Fractal simplex noise
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] on a zero dimension, zero octaves or a non positive scale
pub fn simplex_noise(
    width: usize, height: usize, options: &NoiseOptions, rng: &mut WyRand
) -> Result<RasterBuffer, RasterErrors> {
    fractal_field(width, height, options, rng, simplex)
}

#[cfg(test)]
mod tests {
    use nanorand::WyRand;

    use crate::generate::noise::{
        perlin, perlin_noise, permutation, simplex_noise, white_noise, NoiseOptions
    };

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let options = NoiseOptions::default();

        let a = perlin_noise(32, 32, &options, &mut WyRand::new_seed(9)).unwrap();
        let b = perlin_noise(32, 32, &options, &mut WyRand::new_seed(9)).unwrap();
        let c = perlin_noise(32, 32, &options, &mut WyRand::new_seed(10)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);

        let a = white_noise(8, 8, true, &mut WyRand::new_seed(1)).unwrap();
        let b = white_noise(8, 8, true, &mut WyRand::new_seed(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_spans_full_range() {
        let options = NoiseOptions::default().set_scale(0.1);

        for image in [
            perlin_noise(40, 40, &options, &mut WyRand::new_seed(3)).unwrap(),
            simplex_noise(40, 40, &options, &mut WyRand::new_seed(3)).unwrap()
        ] {
            let values: Vec<u8> = image.pixels().iter().map(|x| x[0]).collect();

            assert_eq!(values.iter().min(), Some(&0));
            assert_eq!(values.iter().max(), Some(&255));
        }
    }

    #[test]
    fn test_perlin_is_zero_on_lattice() {
        let perm = permutation(&mut WyRand::new_seed(5));

        assert_eq!(perlin(&perm, 3.0, 7.0), 0.0);
    }

    #[test]
    fn test_invalid_options() {
        let mut rng = WyRand::new_seed(0);

        assert!(perlin_noise(4, 4, &NoiseOptions::default().set_octaves(0), &mut rng).is_err());
        assert!(simplex_noise(4, 4, &NoiseOptions::default().set_scale(0.0), &mut rng).is_err());
    }
}
