/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Boundary tracing with the Moore neighbourhood
use zune_core::log::{debug, warn};
use zune_raster::buffer::RasterBuffer;

use crate::detect::blobs::{label_components, measure, LabelMap};

/// Upper bound on tracing steps per contour
pub const MAX_TRACE_STEPS: usize = 10_000;

/// Neighbour offsets clockwise, starting north
const DIRECTIONS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1)
];

/// The boundary of one blob as an ordered pixel walk
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct Contour {
    /// Label of the blob this was traced from
    pub label:  usize,
    pub points: Vec<(usize, usize)>
}

/// Trace the outer boundary of every blob of at least `min_area` pixels
///
/// Blobs are found exactly as [`detect_blobs`](crate::detect::detect_blobs) finds them,
/// so contour labels line up with blob labels.
#[must_use]
pub fn find_contours(mask: &RasterBuffer, min_area: usize) -> Vec<Contour> {
    let map = label_components(mask);
    let (blobs, ids) = measure(&map, min_area);

    let contours: Vec<Contour> = blobs
        .iter()
        .zip(ids)
        .map(|(blob, id)| {
            // the first raster pixel of a blob is on the top row of its box
            let y = blob.bounding_box.y;
            let start_x = (blob.bounding_box.x..blob.bounding_box.x + blob.bounding_box.width)
                .find(|x| map.label_at(*x, y) == id)
                .unwrap_or(blob.bounding_box.x);

            Contour {
                label:  blob.label,
                points: trace_boundary(&map, id, (start_x, y))
            }
        })
        .collect();

    debug!("Traced {} contours", contours.len());

    contours
}

fn neighbour(
    map: &LabelMap, id: usize, (x, y): (usize, usize), dir: usize
) -> Option<(usize, usize)> {
    let (dx, dy) = DIRECTIONS[dir];
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;

    if nx < map.width && ny < map.height && map.label_at(nx, ny) == id {
        return Some((nx, ny));
    }
    None
}

/// Walk the boundary clockwise starting at `start`
///
/// Each step searches the neighbours from 90° left of the previous move,
/// sweeping clockwise, and takes the first one inside the blob.
fn trace_boundary(map: &LabelMap, id: usize, start: (usize, usize)) -> Vec<(usize, usize)> {
    let mut points = vec![start];
    let mut current = start;
    // initial direction is north
    let mut direction = 0;
    let mut first_move = None;

    for _ in 0..MAX_TRACE_STEPS {
        let next = (0..8)
            .map(|i| (direction + 6 + i) % 8)
            .find_map(|dir| neighbour(map, id, current, dir).map(|p| (dir, p)));

        let Some((dir, pixel)) = next else {
            // isolated pixel
            return points;
        };

        if current == start {
            match first_move {
                None => first_move = Some(dir),
                Some(m) if m == dir => {
                    // closed, drop the repeated start
                    points.pop();
                    return points;
                }
                Some(_) => {}
            }
        }
        current = pixel;
        direction = dir;
        points.push(current);
    }
    warn!(
        "Contour of blob starting at {:?} did not close after {} steps",
        start, MAX_TRACE_STEPS
    );
    points
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use zune_raster::buffer::{RasterBuffer, Rgba};

    use crate::detect::contours::find_contours;

    fn square(x0: usize, y0: usize, size: usize) -> RasterBuffer {
        RasterBuffer::from_fn(30, 30, |x, y| {
            if (x0..x0 + size).contains(&x) && (y0..y0 + size).contains(&y) {
                Rgba::WHITE
            } else {
                Rgba::BLACK
            }
        })
        .unwrap()
    }

    #[test]
    fn test_square_boundary() {
        let contours = find_contours(&square(5, 7, 10), 1);

        assert_eq!(contours.len(), 1);
        let points = &contours[0].points;

        assert_eq!(points[0], (5, 7));
        assert_eq!(points[1], (6, 7));
        assert_eq!(points.len(), 36);

        let unique: HashSet<_> = points.iter().collect();
        assert_eq!(unique.len(), 36);

        for (x, y) in points {
            assert!(*x == 5 || *x == 14 || *y == 7 || *y == 16);
        }
    }

    #[test]
    fn test_single_pixel_contour() {
        let contours = find_contours(&square(3, 3, 1), 1);
        assert_eq!(contours[0].points, vec![(3, 3)]);
    }

    #[test]
    fn test_labels_follow_blobs() {
        let mut mask = square(1, 1, 3);
        for y in 20..25 {
            for x in 20..25 {
                mask.set_pixel(x, y, Rgba::WHITE).unwrap();
            }
        }
        let contours = find_contours(&mask, 10);

        // the 3x3 square is below the area limit
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].label, 1);
        assert_eq!(contours[0].points[0], (20, 20));
    }
}
