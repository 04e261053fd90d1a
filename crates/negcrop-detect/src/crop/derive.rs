// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop derivation — turn the aggregated frame rectangle into the editing
// tool's crop fractions and rotation.

use negcrop_core::{CropResult, DetectorConfig, RotatedRect, Size2};
use tracing::{debug, instrument};

use crate::crop::aspect::correct_aspect_ratio;

/// Every intermediate rectangle on the way from detection to crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPlan {
    /// Detected rectangle shrunk by the uniform inset.
    pub inset: RotatedRect,
    /// Inset rectangle after aspect-ratio correction.
    pub corrected: RotatedRect,
    /// Whether the aspect corrector changed anything.
    pub aspect_changed: bool,
    pub crop: CropResult,
}

/// Shrink both sides by `inset_percent` of the mean side length.
pub fn inset_rect(rect: &RotatedRect, inset_percent: f64) -> RotatedRect {
    let inset = (rect.size.width + rect.size.height) / 2.0 * inset_percent;
    rect.with_size(Size2::new(rect.size.width - inset, rect.size.height - inset))
}

/// Fold a rotation into the range the editing tool accepts.
///
/// Values above 45 lose 90; values below -90 gain 45. Everything in
/// `[-90, 45]` is returned as is.
pub fn fold_rotation(rotation: f64) -> f64 {
    if rotation > 45.0 {
        rotation - 90.0
    } else if rotation < -90.0 {
        rotation + 45.0
    } else {
        rotation
    }
}

/// Editing-tool rotation for a rectangle angle.
///
/// The rectangle fitter reports landscape frames with a near-90° reference,
/// which the fold removes.
pub fn rotation_for_angle(angle: f64) -> f64 {
    fold_rotation(-angle)
}

/// Edge fractions of the innermost corner on each side.
///
/// Corners are split into left/right and top/bottom of the rectangle's own
/// center (ties count as left and top). Each crop edge takes the corner
/// closest to the center on its side, so a rotated rectangle never pushes the
/// crop out to its own extremes. A side without corners keeps the full-frame
/// edge. Corners keep their sub-pixel position. Returns
/// `(left, right, top, bottom)`.
pub fn crop_fractions(rect: &RotatedRect, width: u32, height: u32) -> (f64, f64, f64, f64) {
    let (cx, cy) = (rect.center.x, rect.center.y);
    let (w, h) = (width as f64, height as f64);

    let mut left: Option<f64> = None;
    let mut right: Option<f64> = None;
    let mut top: Option<f64> = None;
    let mut bottom: Option<f64> = None;

    for corner in rect.corners() {
        if corner.x > cx {
            right = Some(right.map_or(corner.x, |v| v.min(corner.x)));
        } else {
            left = Some(left.map_or(corner.x, |v| v.max(corner.x)));
        }
        if corner.y > cy {
            bottom = Some(bottom.map_or(corner.y, |v| v.min(corner.y)));
        } else {
            top = Some(top.map_or(corner.y, |v| v.max(corner.y)));
        }
    }

    (
        left.map_or(0.0, |x| x / w),
        right.map_or(1.0, |x| x / w),
        top.map_or(0.0, |y| y / h),
        bottom.map_or(1.0, |y| y / h),
    )
}

/// Apply inset, aspect correction, rotation folding and crop conversion to a
/// detected rectangle.
#[instrument(skip(raw, config))]
pub fn plan_crop(raw: &RotatedRect, width: u32, height: u32, config: &DetectorConfig) -> CropPlan {
    let inset = inset_rect(raw, config.inset_percent);
    let correction = correct_aspect_ratio(&inset, config.target_ratio, config.max_difference);
    let corrected = correction.rect;

    let rotation = rotation_for_angle(corrected.angle);
    let (left, right, top, bottom) = crop_fractions(&corrected, width, height);
    let crop = CropResult {
        left,
        right,
        top,
        bottom,
        rotation,
    };

    debug!(
        left,
        right,
        top,
        bottom,
        rotation,
        aspect_changed = correction.changed,
        "Crop derived"
    );
    CropPlan {
        inset,
        corrected,
        aspect_changed: correction.changed,
        crop,
    }
}
