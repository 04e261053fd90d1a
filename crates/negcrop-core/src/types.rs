// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for negcrop: rotated rectangles, sweep thresholds, and
// the crop result handed to the editing tool.

use serde::{Deserialize, Serialize};

/// A point in image space (x to the right, y downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Side lengths of a rectangle along its own axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size2 {
    pub width: f64,
    pub height: f64,
}

impl Size2 {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by its center, its side lengths, and a rotation.
///
/// `angle` is in degrees, measured from the x axis to the side whose length
/// is `size.width`. Rectangles produced by the fitter use the range
/// `[-90, 0)`; other values are accepted everywhere.
///
/// Immutable value: transformations return a new rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatedRect {
    pub center: Point2,
    pub size: Size2,
    pub angle: f64,
}

impl RotatedRect {
    /// Build a rectangle, clamping negative side lengths to zero.
    pub fn new(center: Point2, size: Size2, angle: f64) -> Self {
        Self {
            center,
            size: Size2::new(size.width.max(0.0), size.height.max(0.0)),
            angle,
        }
    }

    /// Same center and angle, different size.
    pub fn with_size(&self, size: Size2) -> Self {
        Self::new(self.center, size, self.angle)
    }

    pub fn area(&self) -> f64 {
        self.size.width * self.size.height
    }

    /// The four corner points.
    ///
    /// Order: the corner reached by going back along the width axis and
    /// forward along the height axis first, then clockwise in a y-down frame.
    pub fn corners(&self) -> [Point2; 4] {
        let radians = self.angle.to_radians();
        let b = radians.cos() * 0.5;
        let a = radians.sin() * 0.5;
        let Point2 { x: cx, y: cy } = self.center;
        let Size2 { width: w, height: h } = self.size;

        let p0 = Point2::new(cx - a * h - b * w, cy + b * h - a * w);
        let p1 = Point2::new(cx + a * h - b * w, cy - b * h - a * w);
        let p2 = Point2::new(2.0 * cx - p0.x, 2.0 * cy - p0.y);
        let p3 = Point2::new(2.0 * cx - p1.x, 2.0 * cy - p1.y);
        [p0, p1, p2, p3]
    }
}

/// Lower/upper binarization bounds driven by the threshold sweep.
///
/// The sweep only runs while `lower < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdState {
    pub lower: u32,
    pub upper: u32,
}

impl ThresholdState {
    pub const fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    /// Whether another sweep iteration is allowed.
    pub const fn is_open(&self) -> bool {
        self.lower < self.upper
    }

    /// Move the lower bound up by `step`.
    pub const fn advance(self, step: u32) -> Self {
        Self {
            lower: self.lower.saturating_add(step),
            upper: self.upper,
        }
    }
}

/// Crop and rotation in the editing tool's terms.
///
/// Each edge is the fractional offset (0..=1) of that crop edge from the
/// image's left (for `left`/`right`) or top (for `top`/`bottom`) edge.
/// `rotation` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropResult {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub rotation: f64,
}

impl CropResult {
    /// Full frame, no rotation. Used whenever nothing was detected.
    pub const FULL_FRAME: Self = Self {
        left: 0.0,
        right: 1.0,
        top: 0.0,
        bottom: 1.0,
        rotation: 0.0,
    };

    /// Fields in sidecar order: left, right, top, bottom, rotation.
    pub fn fields(&self) -> [f64; 5] {
        [self.left, self.right, self.top, self.bottom, self.rotation]
    }
}

impl Default for CropResult {
    fn default() -> Self {
        Self::FULL_FRAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn new_clamps_negative_sizes() {
        let rect = RotatedRect::new(Point2::new(1.0, 1.0), Size2::new(-3.0, 4.0), 0.0);
        assert_eq!(rect.size.width, 0.0);
        assert_eq!(rect.size.height, 4.0);
    }

    #[test]
    fn corners_of_axis_aligned_rect() {
        let rect = RotatedRect::new(Point2::new(50.0, 25.0), Size2::new(100.0, 50.0), 0.0);
        let corners = rect.corners();

        assert!(approx(corners[0].x, 0.0) && approx(corners[0].y, 50.0));
        assert!(approx(corners[1].x, 0.0) && approx(corners[1].y, 0.0));
        assert!(approx(corners[2].x, 100.0) && approx(corners[2].y, 0.0));
        assert!(approx(corners[3].x, 100.0) && approx(corners[3].y, 50.0));
    }

    #[test]
    fn quarter_turn_swaps_extents() {
        // (w, h, a) and (h, w, a - 90) describe the same rectangle.
        let a = RotatedRect::new(Point2::new(10.0, 10.0), Size2::new(8.0, 4.0), 0.0);
        let b = RotatedRect::new(Point2::new(10.0, 10.0), Size2::new(4.0, 8.0), -90.0);

        let extent = |r: &RotatedRect| {
            let c = r.corners();
            let xs = c.iter().map(|p| p.x);
            let min = xs.clone().fold(f64::INFINITY, f64::min);
            let max = xs.fold(f64::NEG_INFINITY, f64::max);
            max - min
        };
        assert!(approx(extent(&a), extent(&b)));
        assert!(approx(extent(&a), 8.0));
    }

    #[test]
    fn threshold_state_advances_and_closes() {
        let state = ThresholdState::new(218, 220);
        assert!(state.is_open());
        let state = state.advance(1);
        assert_eq!(state.lower, 219);
        assert!(state.is_open());
        assert!(!state.advance(5).is_open());
    }

    #[test]
    fn default_crop_is_full_frame() {
        assert_eq!(CropResult::default().fields(), [0.0, 1.0, 0.0, 1.0, 0.0]);
    }
}
