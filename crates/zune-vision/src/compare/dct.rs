/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Two dimensional discrete cosine transform (DCT-II)
use core::f64::consts::PI;

/// Compute the orthonormal 2-D DCT of a square `size x size` block
///
/// `F(u,v) = α(u)α(v) Σx Σy f(x,y) cos((2x+1)uπ/2N) cos((2y+1)vπ/2N)`
/// with `α(0) = √(1/N)` and `α(k) = √(2/N)` otherwise.
///
/// The output is laid out like the input, row `v` holds vertical frequency `v`.
///
/// # Panics
/// If `input.len() != size * size`
#[must_use]
pub fn dct_2d(input: &[f64], size: usize) -> Vec<f64> {
    assert_eq!(input.len(), size * size, "DCT input must be a square block");

    let table = cosine_table(size);
    let mut rows = vec![0.0; size * size];
    let mut output = vec![0.0; size * size];

    // rows first
    for y in 0..size {
        let row = &input[y * size..(y + 1) * size];

        for u in 0..size {
            let basis = &table[u * size..(u + 1) * size];
            rows[y * size + u] = row.iter().zip(basis).map(|(a, b)| a * b).sum();
        }
    }
    // then columns
    for v in 0..size {
        let basis = &table[v * size..(v + 1) * size];

        for u in 0..size {
            output[v * size + u] = (0..size).map(|y| rows[y * size + u] * basis[y]).sum();
        }
    }
    output
}

/// `table[k * size + n] = α(k) cos((2n+1)kπ/2N)`
fn cosine_table(size: usize) -> Vec<f64> {
    let n = size as f64;
    let mut table = vec![0.0; size * size];

    for k in 0..size {
        let alpha = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };

        for (i, entry) in table[k * size..(k + 1) * size].iter_mut().enumerate() {
            *entry = alpha * ((2.0 * i as f64 + 1.0) * k as f64 * PI / (2.0 * n)).cos();
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use crate::compare::dct::dct_2d;

    #[test]
    fn test_constant_block_has_only_dc() {
        let size = 8;
        let block = vec![10.0; size * size];
        let out = dct_2d(&block, size);

        // DC is N times the value for the orthonormal transform
        assert!((out[0] - 80.0).abs() < 1e-9);

        for coefficient in &out[1..] {
            assert!(coefficient.abs() < 1e-9);
        }
    }

    #[test]
    fn test_energy_is_preserved() {
        let size = 4;
        let block: Vec<f64> = (0..16).map(|x| f64::from((x * 7) % 5)).collect();
        let out = dct_2d(&block, size);

        let energy_in: f64 = block.iter().map(|x| x * x).sum();
        let energy_out: f64 = out.iter().map(|x| x * x).sum();

        assert!((energy_in - energy_out).abs() < 1e-9);
    }
}
