/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Voronoi diagrams over random seed points
use nanorand::{Rng, WyRand};
use zune_core::log::trace;
use zune_raster::buffer::{RasterBuffer, Rgba};
use zune_raster::errors::RasterErrors;

struct Seed {
    x:     usize,
    y:     usize,
    color: Rgba
}

/// Color every pixel after its nearest of `points` random seeds
///
/// Seeds get random positions and random opaque colors. Distances are squared
/// Euclidean, on a tie the seed generated first wins.
///
/// # Errors
/// [`RasterErrors::InvalidParameter`] if `points` or a dimension is zero
pub fn voronoi(
    width: usize, height: usize, points: usize, rng: &mut WyRand
) -> Result<RasterBuffer, RasterErrors> {
    if points == 0 {
        return Err(RasterErrors::InvalidParameter(
            "Voronoi diagram needs at least one seed".to_string()
        ));
    }
    if width == 0 || height == 0 {
        return Err(RasterErrors::InvalidParameter(format!(
            "Cannot generate a {width}x{height} image"
        )));
    }
    let seeds: Vec<Seed> = (0..points)
        .map(|_| Seed {
            x:     rng.generate_range(0..width),
            y:     rng.generate_range(0..height),
            color: Rgba::rgb(rng.generate(), rng.generate(), rng.generate())
        })
        .collect();

    trace!("Generated {} Voronoi seeds", seeds.len());

    RasterBuffer::from_fn(width, height, |x, y| nearest(&seeds, x, y).color)
}

fn nearest(seeds: &[Seed], x: usize, y: usize) -> &Seed {
    let mut best = &seeds[0];
    let mut best_distance = usize::MAX;

    for seed in seeds {
        let dx = seed.x.abs_diff(x);
        let dy = seed.y.abs_diff(y);
        let distance = dx * dx + dy * dy;

        // strict, so earlier seeds keep ties
        if distance < best_distance {
            best_distance = distance;
            best = seed;
        }
    }
    best
}
