/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bounding boxes and non maximum suppression
use zune_core::log::trace;

/// An axis aligned rectangle in pixel coordinates
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct BoundingBox {
    pub x:      usize,
    pub y:      usize,
    pub width:  usize,
    pub height: usize
}

impl BoundingBox {
    #[must_use]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> BoundingBox {
        BoundingBox {
            x,
            y,
            width,
            height
        }
    }

    #[must_use]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Area shared by both boxes
    #[must_use]
    pub fn intersection(&self, other: &BoundingBox) -> usize {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);

        x1.saturating_sub(x0) * y1.saturating_sub(y0)
    }

    /// Intersection over union, 0.0 when both boxes are empty
    #[must_use]
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let intersection = self.intersection(other);
        let union = self.area() + other.area() - intersection;

        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}

/// A scored detection
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct Match {
    pub bounding_box: BoundingBox,
    pub confidence:   f64
}

/// Greedy non maximum suppression
///
/// Candidates are visited from the most to the least confident, equal
/// confidences keep their input order. A candidate is kept unless it overlaps
/// an already kept one with an IoU above `iou_threshold`.
#[must_use]
pub fn non_maximum_suppression(mut candidates: Vec<Match>, iou_threshold: f64) -> Vec<Match> {
    // sort_by is stable
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<Match> = Vec::new();

    for candidate in candidates {
        let suppressed = kept
            .iter()
            .any(|k| k.bounding_box.iou(&candidate.bounding_box) > iou_threshold);

        if !suppressed {
            kept.push(candidate);
        }
    }
    trace!("Non maximum suppression kept {} boxes", kept.len());

    kept
}

#[cfg(test)]
mod tests {
    use crate::detect::nms::{non_maximum_suppression, BoundingBox, Match};

    #[test]
    fn test_iou() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let b = BoundingBox::new(5, 0, 10, 10);
        let c = BoundingBox::new(20, 20, 5, 5);

        assert_eq!(a.iou(&a), 1.0);
        // 50 shared over 150 total
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(a.iou(&c), 0.0);
    }

    #[test]
    fn test_suppression() {
        let boxes = vec![
            Match {
                bounding_box: BoundingBox::new(0, 0, 10, 10),
                confidence:   0.8
            },
            Match {
                bounding_box: BoundingBox::new(1, 1, 10, 10),
                confidence:   0.95
            },
            Match {
                bounding_box: BoundingBox::new(50, 50, 10, 10),
                confidence:   0.9
            },
        ];
        let kept = non_maximum_suppression(boxes, 0.5);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].confidence, 0.95);
        assert_eq!(kept[1].bounding_box, BoundingBox::new(50, 50, 10, 10));
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let boxes = vec![
            Match {
                bounding_box: BoundingBox::new(3, 0, 4, 4),
                confidence:   1.0
            },
            Match {
                bounding_box: BoundingBox::new(2, 0, 4, 4),
                confidence:   1.0
            },
        ];
        let kept = non_maximum_suppression(boxes, 0.5);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].bounding_box.x, 3);
    }
}
