/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image moments and Hu invariants
use zune_raster::buffer::RasterBuffer;

/// Smallest value used for `m00` and `μ00` to keep divisions finite
const MOMENT_EPSILON: f64 = 1e-5;

/// Moments are computed for `p,q` in `0..MOMENT_ORDER`
pub const MOMENT_ORDER: usize = 4;

type MomentTable = [[f64; MOMENT_ORDER]; MOMENT_ORDER];

/// Moment based shape descriptor of an image
///
/// Tables are indexed `[p][q]`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct ShapeDescriptor {
    /// Raw moments `m_pq`
    pub raw:        MomentTable,
    /// Central moments `μ_pq`
    pub central:    MomentTable,
    /// Scale normalized moments `η_pq`, zero for `p+q < 2`
    pub normalized: MomentTable,
    /// The first four Hu invariants
    pub hu:         [f64; 4],
    /// Intensity weighted center `(x, y)`
    pub centroid:   (f64, f64)
}

/// Compute moments of the image intensity
///
/// Intensity is the luma of a pixel scaled to `[0,1]`. Images with no
/// intensity at all use `1e-5` for `m00` and `μ00` instead of dividing by zero.
#[must_use]
#[allow(clippy::needless_range_loop)]
pub fn shape_descriptors(buffer: &RasterBuffer) -> ShapeDescriptor {
    let (width, height) = buffer.dimensions();
    let intensity: Vec<f64> = buffer
        .luma_plane()
        .iter()
        .map(|x| f64::from(*x) / 255.0)
        .collect();

    let mut raw = [[0.0; MOMENT_ORDER]; MOMENT_ORDER];

    for y in 0..height {
        for x in 0..width {
            let value = intensity[y * width + x];

            if value == 0.0 {
                continue;
            }
            let mut xp = 1.0;

            for p in 0..MOMENT_ORDER {
                let mut yq = 1.0;

                for q in 0..MOMENT_ORDER {
                    raw[p][q] += xp * yq * value;
                    yq *= y as f64;
                }
                xp *= x as f64;
            }
        }
    }
    let m00 = raw[0][0].max(MOMENT_EPSILON);
    let centroid = (raw[1][0] / m00, raw[0][1] / m00);

    let mut central = [[0.0; MOMENT_ORDER]; MOMENT_ORDER];

    for y in 0..height {
        let dy = y as f64 - centroid.1;

        for x in 0..width {
            let value = intensity[y * width + x];

            if value == 0.0 {
                continue;
            }
            let dx = x as f64 - centroid.0;
            let mut xp = 1.0;

            for p in 0..MOMENT_ORDER {
                let mut yq = 1.0;

                for q in 0..MOMENT_ORDER {
                    central[p][q] += xp * yq * value;
                    yq *= dy;
                }
                xp *= dx;
            }
        }
    }
    let mu00 = central[0][0].max(MOMENT_EPSILON);
    let mut normalized = [[0.0; MOMENT_ORDER]; MOMENT_ORDER];

    for p in 0..MOMENT_ORDER {
        for q in 0..MOMENT_ORDER {
            if p + q >= 2 {
                let exponent = (p + q) as f64 / 2.0 + 1.0;
                normalized[p][q] = central[p][q] / mu00.powf(exponent);
            }
        }
    }

    ShapeDescriptor {
        raw,
        central,
        hu: hu_moments(&normalized),
        normalized,
        centroid
    }
}

/// First four Hu invariants from normalized moments
fn hu_moments(n: &MomentTable) -> [f64; 4] {
    let (n20, n02, n11) = (n[2][0], n[0][2], n[1][1]);
    let (n30, n03, n21, n12) = (n[3][0], n[0][3], n[2][1], n[1][2]);

    let i1 = n20 + n02;
    let i2 = (n20 - n02).powi(2) + 4.0 * n11.powi(2);
    let i3 = (n30 - 3.0 * n12).powi(2) + (3.0 * n21 - n03).powi(2);
    let i4 = (n30 + n12).powi(2) + (n21 + n03).powi(2);

    [i1, i2, i3, i4]
}
