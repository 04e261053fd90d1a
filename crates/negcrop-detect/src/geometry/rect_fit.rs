// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rotated rectangle fitting over contour points.

use std::cmp::Ordering;

use negcrop_core::{Point2, RotatedRect, Size2};

/// Area enclosed by a closed polygon, using the shoelace formula.
///
/// The polygon is closed implicitly (last vertex connects to the first).
/// Fewer than three vertices enclose nothing.
pub fn contour_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0f64;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area.abs() / 2.0
}

/// Convex hull via Andrew's monotone chain, counter-clockwise in a y-up frame.
///
/// Collinear points on the hull boundary are dropped.
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    let mut lower: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }

    // The last point of each chain is the first point of the other.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Cross product of vectors OA and OB.
#[inline]
fn cross(o: Point2, a: Point2, b: Point2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Minimum-area rectangle enclosing `points`.
///
/// Rotating calipers over the convex hull: the optimal rectangle has one side
/// collinear with a hull edge, so every edge direction is tried. The result is
/// normalised to `angle ∈ [-90, 0)`. Returns `None` for an empty point set.
pub fn min_area_rect(points: &[Point2]) -> Option<RotatedRect> {
    let hull = convex_hull(points);

    match hull.len() {
        0 => None,
        1 => Some(RotatedRect::new(hull[0], Size2::default(), -90.0)),
        2 => {
            let (a, b) = (hull[0], hull[1]);
            let center = Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
            let length = (b.x - a.x).hypot(b.y - a.y);
            let angle = (b.y - a.y).atan2(b.x - a.x).to_degrees();
            Some(normalise(center, length, 0.0, angle))
        }
        n => {
            let mut best: Option<(f64, RotatedRect)> = None;

            for i in 0..n {
                let (a, b) = (hull[i], hull[(i + 1) % n]);
                let length = (b.x - a.x).hypot(b.y - a.y);
                if length <= f64::EPSILON {
                    continue;
                }
                // Unit vectors along and across the edge.
                let (ux, uy) = ((b.x - a.x) / length, (b.y - a.y) / length);
                let (vx, vy) = (-uy, ux);

                let (mut min_u, mut max_u) = (f64::INFINITY, f64::NEG_INFINITY);
                let (mut min_v, mut max_v) = (f64::INFINITY, f64::NEG_INFINITY);
                for p in &hull {
                    let u = p.x * ux + p.y * uy;
                    let v = p.x * vx + p.y * vy;
                    min_u = min_u.min(u);
                    max_u = max_u.max(u);
                    min_v = min_v.min(v);
                    max_v = max_v.max(v);
                }

                let (width, height) = (max_u - min_u, max_v - min_v);
                let area = width * height;
                if best.as_ref().is_some_and(|(best_area, _)| area >= *best_area) {
                    continue;
                }

                let mid_u = (min_u + max_u) / 2.0;
                let mid_v = (min_v + max_v) / 2.0;
                let center = Point2::new(mid_u * ux + mid_v * vx, mid_u * uy + mid_v * vy);
                let angle = uy.atan2(ux).to_degrees();
                best = Some((area, normalise(center, width, height, angle)));
            }

            best.map(|(_, rect)| rect)
        }
    }
}

/// Rotate the angle reference by quarter turns into `[-90, 0)`.
///
/// `(w, h, a)` and `(h, w, a - 90)` describe the same rectangle, so each step
/// swaps the side lengths.
fn normalise(center: Point2, width: f64, height: f64, angle: f64) -> RotatedRect {
    let (mut w, mut h, mut a) = (width, height, angle);
    while a >= 0.0 {
        a -= 90.0;
        std::mem::swap(&mut w, &mut h);
    }
    while a < -90.0 {
        a += 90.0;
        std::mem::swap(&mut w, &mut h);
    }
    RotatedRect::new(center, Size2::new(w, h), a)
}
