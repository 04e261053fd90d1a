// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analysis image — a copy of the scan with the detected, inset and corrected
// rectangles drawn over it. Diagnostic only.

use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use negcrop_core::RotatedRect;
use negcrop_core::error::{NegcropError, Result};
use tracing::{debug, instrument};

use crate::detector::Detection;

const RAW_COLOUR: Rgb<u8> = Rgb([0, 0, 255]);
const INSET_COLOUR: Rgb<u8> = Rgb([255, 255, 0]);
const CORRECTED_COLOUR: Rgb<u8> = Rgb([0, 255, 0]);

/// `<scan file name>-analysis.jpg`, next to the scan.
pub fn analysis_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push("-analysis.jpg");
    PathBuf::from(name)
}

/// Draw the detection over an RGB copy of `image`.
///
/// Raw rectangle in blue, inset in yellow (both 1px), corrected in green
/// (2px) with a green center marker. Without a detection the copy is
/// returned unannotated.
pub fn annotate(image: &DynamicImage, detection: &Detection) -> RgbImage {
    let mut canvas = image.to_rgb8();

    if let Some(raw) = &detection.raw {
        draw_rect(&mut canvas, raw, RAW_COLOUR, 1);
    }
    if let Some(inset) = &detection.inset {
        draw_rect(&mut canvas, inset, INSET_COLOUR, 1);
    }
    if let Some(corrected) = &detection.corrected {
        draw_rect(&mut canvas, corrected, CORRECTED_COLOUR, 2);
        let center = (
            corrected.center.x.round() as i32,
            corrected.center.y.round() as i32,
        );
        draw_filled_circle_mut(&mut canvas, center, 4, CORRECTED_COLOUR);
    }

    canvas
}

/// Annotate `image` and write it as JPEG next to `input`.
#[instrument(skip(image, detection), fields(input = %input.display()))]
pub fn save_analysis(input: &Path, image: &DynamicImage, detection: &Detection) -> Result<PathBuf> {
    let path = analysis_path(input);
    let annotated = DynamicImage::ImageRgb8(annotate(image, detection));
    annotated.save(&path).map_err(|err| {
        NegcropError::ImageEncode(format!(
            "failed to save analysis image to {}: {}",
            path.display(),
            err
        ))
    })?;
    debug!(path = %path.display(), "Analysis image written");
    Ok(path)
}

/// Outline a rotated rectangle. Thicker outlines repeat the outline shifted
/// by whole pixels.
fn draw_rect(canvas: &mut RgbImage, rect: &RotatedRect, colour: Rgb<u8>, thickness: u32) {
    let corners = rect.corners();
    for offset in 0..thickness {
        let d = offset as f32;
        for i in 0..corners.len() {
            let a = corners[i];
            let b = corners[(i + 1) % corners.len()];
            draw_line_segment_mut(
                canvas,
                (a.x as f32 + d, a.y as f32 + d),
                (b.x as f32 + d, b.y as f32 + d),
                colour,
            );
        }
    }
}
