// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-field median of candidate rectangles.

use negcrop_core::{Point2, RotatedRect, Size2};

/// Reduce candidates to one rectangle by taking the median of each field
/// (center x, center y, width, height, angle) independently.
///
/// The composite need not equal any single candidate. Even-length inputs
/// average the two middle values. Returns `None` for an empty set, which
/// callers treat as "no detection".
pub fn median_rect(rects: &[RotatedRect]) -> Option<RotatedRect> {
    Some(RotatedRect::new(
        Point2::new(field(rects, |r| r.center.x)?, field(rects, |r| r.center.y)?),
        Size2::new(field(rects, |r| r.size.width)?, field(rects, |r| r.size.height)?),
        field(rects, |r| r.angle)?,
    ))
}

fn field(rects: &[RotatedRect], get: impl Fn(&RotatedRect) -> f64) -> Option<f64> {
    median(rects.iter().map(get).collect())
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}
