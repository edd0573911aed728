/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Perceptual image hashes
//!
//! Three hashes are provided, each producing `hash_size²` bits
//!
//! - [`average_hash`]: bit set when a pixel of the `N x N` thumbnail is at least the mean
//! - [`difference_hash`]: bit set when a pixel of the `(N+1) x N` thumbnail is darker than its right neighbour
//! - [`perceptual_hash`]: bit set when a low frequency DCT coefficient of the 32x32 thumbnail
//!   is at least the median of the `N x N` block
//!
//! Similar images have hashes with a small Hamming distance.
use core::fmt::{Display, Formatter};
use core::str::FromStr;

use zune_core::log::trace;
use zune_raster::buffer::RasterBuffer;
use zune_raster::errors::RasterErrors;
use zune_raster::grayscale::luma_u8;
use zune_raster::resize::resize_bilinear;

use crate::compare::dct::dct_2d;

/// Hash size used when none is given
pub const DEFAULT_HASH_SIZE: usize = 8;

/// Thumbnail size the DCT hash is computed on, also its largest hash size
pub const DCT_SIZE: usize = 32;

/// A fixed length bit string
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PerceptualHash {
    bits: Vec<bool>
}

impl PerceptualHash {
    #[must_use]
    pub fn from_bits(bits: Vec<bool>) -> PerceptualHash {
        PerceptualHash { bits }
    }

    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of positions at which the two hashes differ
    ///
    /// # Errors
    /// [`RasterErrors::HashLengthMismatch`] if the hashes differ in length
    pub fn hamming_distance(&self, other: &PerceptualHash) -> Result<usize, RasterErrors> {
        if self.len() != other.len() {
            return Err(RasterErrors::HashLengthMismatch(self.len(), other.len()));
        }
        Ok(self
            .bits
            .iter()
            .zip(&other.bits)
            .filter(|(a, b)| a != b)
            .count())
    }

    /// `1 - distance / length`, 1.0 for identical hashes
    ///
    /// # Errors
    /// [`RasterErrors::HashLengthMismatch`] if the hashes differ in length
    pub fn similarity(&self, other: &PerceptualHash) -> Result<f64, RasterErrors> {
        let distance = self.hamming_distance(other)?;

        if self.is_empty() {
            return Ok(1.0);
        }
        Ok(1.0 - distance as f64 / self.len() as f64)
    }
}

impl Display for PerceptualHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for PerceptualHash {
    type Err = RasterErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .trim()
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(RasterErrors::InvalidParameter(format!(
                    "Invalid character {c:?} in hash, expected 0 or 1"
                )))
            })
            .collect::<Result<Vec<bool>, RasterErrors>>()?;

        Ok(PerceptualHash { bits })
    }
}

#[cfg(feature = "serde-support")]
impl serde::Serialize for PerceptualHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn check_hash_size(hash_size: usize) -> Result<(), RasterErrors> {
    if hash_size == 0 {
        return Err(RasterErrors::InvalidParameter(
            "Hash size must be greater than zero".to_string()
        ));
    }
    Ok(())
}

/// Resize and convert to grayscale values
fn thumbnail(
    buffer: &RasterBuffer, width: usize, height: usize
) -> Result<Vec<f64>, RasterErrors> {
    let small = resize_bilinear(buffer, width, height)?;

    Ok(small
        .pixels()
        .iter()
        .map(|x| f64::from(luma_u8(x[0], x[1], x[2])))
        .collect())
}

/// Average hash
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `hash_size` is zero
pub fn average_hash(buffer: &RasterBuffer, hash_size: usize) -> Result<PerceptualHash, RasterErrors> {
    check_hash_size(hash_size)?;

    let pixels = thumbnail(buffer, hash_size, hash_size)?;
    let mean = pixels.iter().sum::<f64>() / pixels.len() as f64;

    trace!("Average hash mean: {}", mean);

    Ok(PerceptualHash::from_bits(
        pixels.iter().map(|x| *x >= mean).collect()
    ))
}

/// Difference hash
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `hash_size` is zero
pub fn difference_hash(
    buffer: &RasterBuffer, hash_size: usize
) -> Result<PerceptualHash, RasterErrors> {
    check_hash_size(hash_size)?;

    let stride = hash_size + 1;
    let pixels = thumbnail(buffer, stride, hash_size)?;

    let bits = pixels
        .chunks_exact(stride)
        .flat_map(|row| row.windows(2).map(|pair| pair[0] < pair[1]))
        .collect();

    Ok(PerceptualHash::from_bits(bits))
}

/// DCT based perceptual hash
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `hash_size` is zero or larger than [`DCT_SIZE`]
pub fn perceptual_hash(
    buffer: &RasterBuffer, hash_size: usize
) -> Result<PerceptualHash, RasterErrors> {
    check_hash_size(hash_size)?;

    if hash_size > DCT_SIZE {
        return Err(RasterErrors::InvalidParameter(format!(
            "DCT hash size {hash_size} is larger than {DCT_SIZE}"
        )));
    }
    let pixels = thumbnail(buffer, DCT_SIZE, DCT_SIZE)?;
    let coefficients = dct_2d(&pixels, DCT_SIZE);

    let block: Vec<f64> = coefficients
        .chunks_exact(DCT_SIZE)
        .take(hash_size)
        .flat_map(|row| row[..hash_size].iter().copied())
        .collect();

    let median = median(&block);

    Ok(PerceptualHash::from_bits(
        block.iter().map(|x| *x >= median).collect()
    ))
}

/// Median, the mean of the two middle values for even lengths
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}


#[cfg(feature = "benchmarks")]
#[cfg(test)]
mod benchmarks {
    extern crate test;

    use zune_raster::buffer::{RasterBuffer, Rgba};

    use crate::compare::hash::perceptual_hash;

    #[bench]
    fn perceptual_hash_bench(b: &mut test::Bencher) {
        let image =
            RasterBuffer::from_fn(800, 600, |x, y| Rgba::rgb(x as u8, y as u8, 128)).unwrap();

        b.iter(|| perceptual_hash(&image, 8).unwrap());
    }
}
