/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Distances between feature vectors
//!
//! Vectors of different lengths are compared over the length of the shorter one.

#[must_use]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[must_use]
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Cosine of the angle between two vectors
///
/// Returns 0.0 if either vector has zero magnitude
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use crate::compare::vector::{cosine_similarity, euclidean_distance, manhattan_distance};

    #[test]
    fn test_distances() {
        let a = [0.0, 3.0, 1.0];
        let b = [4.0, 0.0, 1.0];

        assert_eq!(euclidean_distance(&a, &b), 5.0);
        assert_eq!(manhattan_distance(&a, &b), 7.0);
        assert!((cosine_similarity(&a, &b) - 1.0 / 17.0_f64.sqrt() / 10.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_shorter_length_is_used() {
        let a = [1.0, 2.0];
        let b = [1.0, 2.0, 100.0];

        assert_eq!(euclidean_distance(&a, &b), 0.0);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_magnitude() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
