// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame detector — runs preprocessing, the threshold sweep, and crop
// derivation for one scan.

use image::DynamicImage;
use negcrop_core::error::{NegcropError, Result};
use negcrop_core::{CropResult, DetectorConfig, RotatedRect};
use serde::Serialize;
use tracing::{info, instrument};

use crate::crop::derive::plan_crop;
use crate::scan::candidate::ImageCandidates;
use crate::scan::preprocess::preprocess;
use crate::sweep::search::{SweepReport, adaptive_search};

/// Everything known about one scan after detection.
///
/// When nothing was detected all rectangles are `None` and `crop` is
/// [`CropResult::FULL_FRAME`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Median of the collected candidates.
    pub raw: Option<RotatedRect>,
    /// `raw` after the uniform inset.
    pub inset: Option<RotatedRect>,
    /// `inset` after aspect-ratio correction.
    pub corrected: Option<RotatedRect>,
    pub aspect_changed: bool,
    pub crop: CropResult,
    pub sweep: SweepReport,
}

impl Detection {
    pub fn is_detected(&self) -> bool {
        self.raw.is_some()
    }
}

/// Locates the exposed frame in film negative scans.
///
/// Holds only configuration; every call to [`FrameDetector::detect`] works on
/// fresh per-image state.
///
/// ```ignore
/// let detector = FrameDetector::new(DetectorConfig::default())?;
/// let detection = detector.detect(&FrameDetector::open_scan("scan.tif")?)?;
/// println!("{:?}", detection.crop);
/// ```
#[derive(Debug, Clone)]
pub struct FrameDetector {
    config: DetectorConfig,
}

impl FrameDetector {
    /// Create a detector after validating `config`.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Decode a scan from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open_scan(path: impl AsRef<std::path::Path>) -> Result<DynamicImage> {
        let image = image::open(path.as_ref()).map_err(|err| {
            NegcropError::ImageDecode(format!(
                "failed to open scan {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(
            width = image.width(),
            height = image.height(),
            "Scan image loaded"
        );
        Ok(image)
    }

    /// Run the full detection pipeline on a decoded scan.
    ///
    /// ## Pipeline
    ///
    /// 1. Preprocess into an equalised luma channel and light-source mask
    /// 2. Sweep the lower threshold, collecting plausible candidates
    /// 3. Median of the collected candidates
    /// 4. Inset, aspect correction, rotation fold and crop fractions
    ///
    /// Fails only for unusable input; an empty sweep yields the full-frame
    /// default.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect(&self, image: &DynamicImage) -> Result<Detection> {
        let pre = preprocess(image, &self.config)?;
        let (width, height) = (pre.width(), pre.height());

        let source = ImageCandidates::new(&pre.gray, &pre.mask, self.config.noise_erode_radius);
        let outcome = adaptive_search(&source, width, height, &self.config);

        let detection = match outcome.rect {
            Some(raw) => {
                let plan = plan_crop(&raw, width, height, &self.config);
                Detection {
                    raw: Some(raw),
                    inset: Some(plan.inset),
                    corrected: Some(plan.corrected),
                    aspect_changed: plan.aspect_changed,
                    crop: plan.crop,
                    sweep: outcome.report,
                }
            }
            None => Detection {
                raw: None,
                inset: None,
                corrected: None,
                aspect_changed: false,
                crop: CropResult::FULL_FRAME,
                sweep: outcome.report,
            },
        };

        info!(
            detected = detection.is_detected(),
            left = detection.crop.left,
            right = detection.crop.right,
            top = detection.crop.top,
            bottom = detection.crop.bottom,
            rotation = detection.crop.rotation,
            "Frame detection complete"
        );
        Ok(detection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn invalid_config_is_rejected() {
        let config = DetectorConfig {
            fine_step: 0,
            ..DetectorConfig::default()
        };
        assert!(matches!(FrameDetector::new(config), Err(NegcropError::Config(_))));
    }

    #[test]
    fn uniform_bright_scan_gives_default_crop() {
        let detector = FrameDetector::new(DetectorConfig::default()).expect("detector");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(90, 60, Rgb([250u8, 250, 250])));

        let detection = detector.detect(&img).expect("detect");
        assert!(!detection.is_detected());
        assert_eq!(detection.crop, CropResult::FULL_FRAME);
        assert_eq!(detection.sweep.collected, 0);
        assert!(detection.inset.is_none() && detection.corrected.is_none());
    }

    #[test]
    fn grayscale_scan_is_an_error() {
        let detector = FrameDetector::new(DetectorConfig::default()).expect("detector");
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 10, Luma([0u8])));
        assert!(matches!(
            detector.detect(&img),
            Err(NegcropError::UnsupportedChannels { found: 1 })
        ));
    }

    #[test]
    fn open_missing_file_is_decode_error() {
        let err = FrameDetector::open_scan("/nonexistent/negcrop/scan.png").unwrap_err();
        assert!(matches!(err, NegcropError::ImageDecode(_)));
    }
}
