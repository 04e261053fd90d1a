// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Candidate extraction — binarize at one threshold pair, drop noise, and fit
// a rotated rectangle to the largest external contour.

use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::morphology::erode;
use negcrop_core::{Point2, RotatedRect, ThresholdState};
use tracing::trace;

use crate::geometry::{contour_area, min_area_rect};
use crate::scan::preprocess::IgnoreMask;

/// Best region found at one threshold pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Minimum-area rectangle around the largest contour, if any.
    pub rect: Option<RotatedRect>,
    /// Area enclosed by that contour (0 when there is none).
    pub area: f64,
}

impl Candidate {
    /// Nothing found.
    pub const NONE: Self = Self {
        rect: None,
        area: 0.0,
    };
}

/// Anything the threshold sweep can query for a candidate.
///
/// The production source is [`ImageCandidates`]; the seam lets the sweep be
/// driven by precomputed or synthetic candidates.
pub trait CandidateSource {
    /// Extract the best candidate for the given threshold pair.
    fn extract(&self, thresholds: ThresholdState) -> Candidate;
}

/// Candidate extraction over a preprocessed scan.
pub struct ImageCandidates<'a> {
    gray: &'a GrayImage,
    mask: &'a IgnoreMask,
    /// Chebyshev radius of the noise erosion.
    erode_radius: u8,
}

impl<'a> ImageCandidates<'a> {
    pub fn new(gray: &'a GrayImage, mask: &'a IgnoreMask, erode_radius: u8) -> Self {
        Self {
            gray,
            mask,
            erode_radius,
        }
    }

    /// Binary foreground for a threshold pair, before noise removal.
    ///
    /// Inverted threshold: intensities at or below `lower` become foreground
    /// with value `upper` (capped at 255). Masked-out pixels never do.
    pub fn binarize(&self, thresholds: ThresholdState) -> GrayImage {
        let on = thresholds.upper.min(255) as u8;
        let (width, height) = self.gray.dimensions();
        GrayImage::from_fn(width, height, |x, y| {
            let value = self.gray.get_pixel(x, y).0[0] as u32;
            if value <= thresholds.lower && self.mask.is_eligible(x, y) {
                Luma([on])
            } else {
                Luma([0u8])
            }
        })
    }
}

impl CandidateSource for ImageCandidates<'_> {
    fn extract(&self, thresholds: ThresholdState) -> Candidate {
        let binary = self.binarize(thresholds);

        // Strip small outlier blobs so they cannot spoil the rectangle fit.
        let cleaned = if self.erode_radius > 0 {
            erode(&binary, Norm::LInf, self.erode_radius)
        } else {
            binary
        };

        largest_external_region(&cleaned)
    }
}

/// Fit a rectangle to the largest external contour of a binary image.
pub fn largest_external_region(binary: &GrayImage) -> Candidate {
    let contours = find_contours::<i32>(binary);

    let mut best = Candidate::NONE;
    let mut best_points: Option<Vec<Point2>> = None;

    for contour in contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
    {
        let points: Vec<Point2> = contour
            .points
            .iter()
            .map(|p| Point2::new(p.x as f64, p.y as f64))
            .collect();
        let area = contour_area(&points);

        if area > best.area {
            best.area = area;
            best_points = Some(points);
        }
    }

    if let Some(points) = best_points {
        best.rect = min_area_rect(&points);
    }

    trace!(
        contours = contours.len(),
        area = best.area,
        "Largest external region"
    );
    best
}
