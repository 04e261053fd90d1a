// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Aspect-ratio correction of a detected frame rectangle.

use negcrop_core::{RotatedRect, Size2};
use tracing::debug;

/// One of the rectangle's own axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// `size.width`
    X,
    /// `size.height`
    Y,
}

impl Axis {
    fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    fn get(self, size: &Size2) -> f64 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    fn set(self, size: &mut Size2, value: f64) {
        match self {
            Axis::X => size.width = value,
            Axis::Y => size.height = value,
        }
    }
}

/// Outcome of [`correct_aspect_ratio`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectCorrection {
    pub rect: RotatedRect,
    /// `false` when the input was returned untouched.
    pub changed: bool,
}

/// Nudge `rect` to `target_ratio` (longer side / shorter side).
///
/// Only rectangles already within `max_difference` of the target are
/// corrected; anything further off is likely a bad detection and is
/// returned unchanged. A ratio that is too wide shortens the longer side, a
/// ratio that is too narrow shortens the shorter side. The new lengths go
/// back onto whichever of the rectangle's own axes held them, so
/// orientation, center and angle are preserved.
pub fn correct_aspect_ratio(
    rect: &RotatedRect,
    target_ratio: f64,
    max_difference: f64,
) -> AspectCorrection {
    let unchanged = AspectCorrection {
        rect: *rect,
        changed: false,
    };

    let long_axis = if rect.size.width >= rect.size.height {
        Axis::X
    } else {
        Axis::Y
    };
    let short_axis = long_axis.other();
    let long = long_axis.get(&rect.size);
    let short = short_axis.get(&rect.size);

    if short <= 0.0 {
        debug!(long, short, "Degenerate rectangle; aspect correction skipped");
        return unchanged;
    }

    let aspect_ratio = long / short;
    if (target_ratio - aspect_ratio).abs() > max_difference {
        debug!(
            aspect_ratio,
            target_ratio, max_difference, "Aspect ratio too far from target; left as detected"
        );
        return unchanged;
    }

    let mut size = rect.size;
    if aspect_ratio > target_ratio {
        long_axis.set(&mut size, short * target_ratio);
    } else if aspect_ratio < target_ratio {
        short_axis.set(&mut size, long / target_ratio);
    }

    debug!(
        aspect_ratio,
        width = size.width,
        height = size.height,
        "Aspect ratio corrected"
    );
    AspectCorrection {
        rect: rect.with_size(size),
        changed: true,
    }
}
